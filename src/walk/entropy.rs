/// Random source consumed by path generation, hue evolution and spawn rolls.
///
/// Every [`rand::RngCore`] is an `Entropy`; tests can script choices with a local type.
pub trait Entropy {
    /// Uniform sample in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform index in `[0, len)`. Callers never pass `len == 0`.
    fn index(&mut self, len: usize) -> usize;

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// Symmetric offset within `spread` degrees either way.
    ///
    /// Random generators sample the closed range `[-spread, +spread]`; the default derives the
    /// offset from [`Entropy::unit`].
    fn jitter(&mut self, spread: f64) -> f64 {
        self.unit() * spread * 2.0 - spread
    }
}

impl<R: rand::RngCore> Entropy for R {
    fn unit(&mut self) -> f64 {
        rand::Rng::r#gen::<f64>(self)
    }

    fn index(&mut self, len: usize) -> usize {
        rand::Rng::gen_range(self, 0..len)
    }

    fn jitter(&mut self, spread: f64) -> f64 {
        let spread = spread.abs();
        rand::Rng::gen_range(self, -spread..=spread)
    }
}
