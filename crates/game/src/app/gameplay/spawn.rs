use rand::Rng;

/// Probability-plus-spacing rule shared by the obstacle and cloud pools.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SpawnGate {
    pub chance: f32,
    pub min_gap: f32,
}

impl SpawnGate {
    /// Draws one roll every call, so the RNG stream does not depend on pool
    /// contents.
    pub(crate) fn roll<R: Rng>(
        &self,
        rng: &mut R,
        newest_x: Option<f32>,
        field_width: f32,
    ) -> bool {
        let roll = rng.random::<f32>();
        self.allows(roll, newest_x, field_width)
    }

    pub(crate) fn allows(&self, roll: f32, newest_x: Option<f32>, field_width: f32) -> bool {
        roll < self.chance && newest_x.map_or(true, |x| x < field_width - self.min_gap)
    }
}

/// True once the trailing (right) edge has passed the left boundary.
pub(crate) fn has_exited_left(x: f32, width: f32) -> bool {
    x + width < 0.0
}
