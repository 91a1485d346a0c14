/// Points per squared line count, multiplied by the current level.
const LINE_CLEAR_POINTS: usize = 100;

/// Lines needed to advance one level.
const LINES_PER_LEVEL: usize = 10;

/// Game statistics tracking score, lines cleared, and piece count.
///
/// - **Score**: each drop adds `cleared² × 100 × level`, using the level before the drop
/// - **Level**: starts at 1 and increases every 10 cleared lines
/// - **Completed pieces**: total number of pieces locked
/// - **Line clear distribution**: count of drops by number of lines cleared
///
/// # Example
///
/// ```
/// use tetrevo_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 1600);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the current level, starting at 1.
    #[must_use]
    pub const fn level(&self) -> usize {
        1 + self.total_cleared_lines / LINES_PER_LEVEL
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of drops by lines cleared; index `n` counts drops that cleared `n`.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece is locked.
    pub const fn complete_piece_drop(&mut self, cleared_lines: usize) {
        self.score += cleared_lines * cleared_lines * LINE_CLEAR_POINTS * self.level();
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if cleared_lines < self.line_cleared_counter.len() {
            self.line_cleared_counter[cleared_lines] += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats() {
        let stats = GameStats::new();
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.completed_pieces(), 0);
        assert_eq!(stats.line_cleared_counter(), &[0; 5]);
    }

    #[test]
    fn test_score_uses_level_before_drop() {
        let mut stats = GameStats::new();
        for _ in 0..9 {
            stats.complete_piece_drop(1);
        }
        assert_eq!(stats.score(), 900);
        assert_eq!(stats.level(), 1);

        // Reaching 10 lines happens on this drop, so it still scores at level 1.
        stats.complete_piece_drop(1);
        assert_eq!(stats.score(), 1000);
        assert_eq!(stats.level(), 2);

        stats.complete_piece_drop(2);
        assert_eq!(stats.score(), 1000 + 4 * 100 * 2);
    }

    #[test]
    fn test_counts_drops_without_clears() {
        let mut stats = GameStats::new();
        stats.complete_piece_drop(0);
        stats.complete_piece_drop(0);
        stats.complete_piece_drop(3);
        assert_eq!(stats.completed_pieces(), 3);
        assert_eq!(stats.total_cleared_lines(), 3);
        assert_eq!(stats.line_cleared_counter(), &[2, 0, 0, 1, 0]);
        assert_eq!(stats.score(), 900);
    }
}
