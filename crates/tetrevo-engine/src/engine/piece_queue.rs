use rand::Rng;

use crate::core::PieceKind;

/// One-slot preview of the upcoming piece.
///
/// Every piece is drawn uniformly from the seven kinds. The queue owns no generator; callers
/// pass their RNG in so that a seeded run replays the same sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceQueue {
    next: PieceKind,
}

impl PieceQueue {
    /// Creates a queue with a freshly drawn next piece.
    pub fn new<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            next: rng.random(),
        }
    }

    /// Returns the piece that the next [`Self::pop_next`] will hand out.
    #[must_use]
    pub const fn peek_next(&self) -> PieceKind {
        self.next
    }

    /// Takes the previewed piece and draws a replacement.
    pub fn pop_next<R>(&mut self, rng: &mut R) -> PieceKind
    where
        R: Rng + ?Sized,
    {
        std::mem::replace(&mut self.next, rng.random())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_pop_returns_previewed_piece() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut queue = PieceQueue::new(&mut rng);
        for _ in 0..50 {
            let expected = queue.peek_next();
            assert_eq!(queue.pop_next(&mut rng), expected);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut rng1 = Pcg32::seed_from_u64(42);
        let mut rng2 = Pcg32::seed_from_u64(42);
        let mut queue1 = PieceQueue::new(&mut rng1);
        let mut queue2 = PieceQueue::new(&mut rng2);
        for _ in 0..20 {
            assert_eq!(queue1.pop_next(&mut rng1), queue2.pop_next(&mut rng2));
        }
    }
}
