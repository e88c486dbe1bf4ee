/// Words shown in the typing view.
pub const WINDOW_SIZE: usize = 7;
/// Completed words kept visible behind the current one.
pub const LOOK_BEHIND: usize = 3;

/// A slice of the word list plus its position in the full list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'a, T> {
    pub offset: usize,
    pub items: &'a [T],
}

impl<'a, T> Window<'a, T> {
    /// Exclusive end index in the full list.
    pub fn end(&self) -> usize {
        self.offset + self.items.len()
    }

    /// Items paired with their global indices.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, &'a T)> + '_ {
        let offset = self.offset;
        self.items.iter().enumerate().map(move |(i, w)| (offset + i, w))
    }
}

/// Select up to `size` items around `current`, keeping `look_behind` earlier
/// items visible and clamping against both ends of the list.
pub fn visible_window<T>(items: &[T], current: usize, size: usize, look_behind: usize) -> Window<'_, T> {
    let len = items.len();
    let mut start = current.saturating_sub(look_behind);
    if start + size > len {
        start = len.saturating_sub(size);
    }
    let end = len.min(start + size);
    Window {
        offset: start,
        items: &items[start..end],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn window_in_the_middle() {
        let words = numbers(20);
        let w = visible_window(&words, 15, 7, 3);
        assert_eq!(w.offset, 12);
        assert_eq!(w.end(), 19);
        assert_eq!(w.items, &[12, 13, 14, 15, 16, 17, 18]);
    }

    #[test]
    fn window_at_start() {
        let words = numbers(20);
        let w = visible_window(&words, 1, 7, 3);
        assert_eq!(w.offset, 0);
        assert_eq!(w.end(), 7);
    }

    #[test]
    fn window_clamped_at_end() {
        let words = numbers(20);
        let w = visible_window(&words, 19, 7, 3);
        assert_eq!(w.offset, 13);
        assert_eq!(w.end(), 20);
    }

    #[test]
    fn window_past_the_end() {
        let words = numbers(5);
        let w = visible_window(&words, 5, 7, 3);
        assert_eq!(w.offset, 0);
        assert_eq!(w.items.len(), 5);
    }

    #[test]
    fn window_of_empty_list() {
        let words: Vec<usize> = vec![];
        let w = visible_window(&words, 0, 7, 3);
        assert_eq!(w.offset, 0);
        assert!(w.items.is_empty());
    }

    #[test]
    fn indexed_reports_global_positions() {
        let words = numbers(20);
        let w = visible_window(&words, 10, 4, 1);
        let globals: Vec<usize> = w.indexed().map(|(i, _)| i).collect();
        assert_eq!(globals, vec![9, 10, 11, 12]);
    }
}
