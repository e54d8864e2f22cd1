// Reuse of the previous layout pass.
//
// A wall re-renders far more often than its message list changes. The memo
// keeps the last id sequence and config with their result and hands the same
// result back while neither changes.

use super::{layout_items, LayoutConfig, LayoutResult};

#[derive(Debug, Default)]
pub struct LayoutMemo {
    last: Option<(Vec<String>, LayoutConfig, LayoutResult)>,
    passes: usize,
}

impl LayoutMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the layout for `ids`, recomputing only when the input changed.
    pub fn layout<S: AsRef<str>>(&mut self, ids: &[S], cfg: &LayoutConfig) -> &LayoutResult {
        let entry = match self.last.take() {
            Some((prev_ids, prev_cfg, result))
                if prev_cfg == *cfg
                    && prev_ids.len() == ids.len()
                    && prev_ids.iter().zip(ids).all(|(a, b)| a == b.as_ref()) =>
            {
                (prev_ids, prev_cfg, result)
            }
            _ => {
                self.passes += 1;
                let owned = ids.iter().map(|s| s.as_ref().to_string()).collect();
                (owned, cfg.clone(), layout_items(ids, cfg))
            }
        };

        &self.last.insert(entry).2
    }

    /// Number of layout passes actually computed.
    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reuses_identical_input() {
        let cfg = LayoutConfig::default();
        let mut memo = LayoutMemo::new();

        let first = memo.layout(&["a", "b", "c"], &cfg).clone();
        let second = memo.layout(&["a", "b", "c"], &cfg).clone();

        assert_eq!(first, second);
        assert_eq!(memo.passes(), 1);
    }

    #[test]
    fn test_recomputes_on_change() {
        let cfg = LayoutConfig::default();
        let mut memo = LayoutMemo::new();

        memo.layout(&["a", "b", "c"], &cfg);
        let grown = memo.layout(&["new", "a", "b", "c"], &cfg).clone();
        assert_eq!(memo.passes(), 2);
        assert_eq!(grown, layout_items(&["new", "a", "b", "c"], &cfg));

        let tighter = LayoutConfig { max_attempts: 1, ..LayoutConfig::default() };
        memo.layout(&["new", "a", "b", "c"], &tighter);
        assert_eq!(memo.passes(), 3);
    }

    #[test]
    fn test_clear() {
        let cfg = LayoutConfig::default();
        let mut memo = LayoutMemo::new();
        memo.layout(&["a"], &cfg);
        memo.clear();
        memo.layout(&["a"], &cfg);
        assert_eq!(memo.passes(), 2);
    }
}
