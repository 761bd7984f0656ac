/// One point mass of a discretized string.
///
/// Displacement and velocity are stored twice, one slot per generation. The
/// owning `UniformString` decides which slot is current; a segment never
/// flips anything on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct StringSegment {
    pub(crate) length: f64, // rest length of the spring to the right neighbour (m)
    pub(crate) mass: f64,   // kg
    pub(crate) displacement: [f64; 2],
    pub(crate) velocity: [f64; 2],
    pub(crate) acceleration: f64,
    pub(crate) is_node: bool,
}

impl StringSegment {
    pub(crate) fn new(length: f64, mass: f64, is_node: bool) -> Self {
        Self {
            length,
            mass,
            displacement: [0.0; 2],
            velocity: [0.0; 2],
            acceleration: 0.0,
            is_node,
        }
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// True for the clamped end points.
    pub fn is_node(&self) -> bool {
        self.is_node
    }

    /// Displacement stored in generation slot `state` (0 or 1).
    pub fn displacement(&self, state: usize) -> f64 {
        self.displacement[state & 1]
    }

    pub fn velocity(&self, state: usize) -> f64 {
        self.velocity[state & 1]
    }

    /// Acceleration computed during the most recent step.
    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }

    /// Clamp a node in `slot`. Nodes hold zero in both slots, so clamping the
    /// slot being written is enough to keep them pinned.
    #[inline]
    pub(crate) fn clamp(&mut self, slot: usize) {
        self.displacement[slot] = 0.0;
        self.velocity[slot] = 0.0;
        self.acceleration = 0.0;
    }

    pub(crate) fn reset(&mut self) {
        self.displacement = [0.0; 2];
        self.velocity = [0.0; 2];
        self.acceleration = 0.0;
    }
}
