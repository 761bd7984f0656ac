use tracing::debug;

use crate::{
    config::StringConfig,
    error::{DspError, Result},
    string::segment::StringSegment,
};

/*
Mass-Spring String
==================

A vibrating string is modelled as a row of point masses joined by springs.
The two end masses are clamped (nodes), like a string held at the nut and
the bridge. Every other mass only moves transversely (up and down).

    node                                                   node
     o-----o-----o-----o-----o-----o-----o-----o-----o-----o
     0     1     2    ...                             N-2  N-1
      <-dx->

Forces on one mass
------------------

Each interior mass feels a pull from its left and right neighbour. The pull
along each spring is a constant base tension plus an elastic term for stretch
beyond the rest length:

    pull = (l - dx) / stiffness + tension

Only the transverse part moves the mass, so the pull is projected with the
direction cosine dy / l:

                 o (i+1)
                /|
            l2 / | dy2
              /  |
    (i) o----+---+
          dx2

    a[i] = ( pull1 * dy1/l1 + pull2 * dy2/l2 ) / mass[i]

Tension comes from the fundamental of an ideal string:

    f = (1 / 2L) * sqrt(T / mu)   =>   T = (2 L f)^2 * mu


Integration
-----------

One explicit step of size dt, per interior segment:

    v' = v + dt * a
    d' = d + dt * v + 0.5 * dt^2 * a

The scheme adds a little energy every step, roughly a factor of
1 + (omega * dt)^2 / 4 in amplitude for a mode of angular frequency omega.
With dt far below sqrt(mass / (tension / dx)) that growth is negligible over
thousands of steps. When dt is comparable to or larger than that bound the
displacement runs away and turns into inf/NaN. That is accepted: the step
never panics, it just keeps propagating whatever numbers it has.


Double Buffering
----------------

Every segment keeps two copies of displacement and velocity. `state` names
the current slot. A step reads only slot `state`, writes only slot
`1 - state`, and flips `state` once every segment is written, so no segment
ever sees a half-updated neighbour and a renderer can read the current slot
between steps without copying.
*/

pub struct UniformString {
    segments: Vec<StringSegment>,
    length: f64,
    mass_per_unit_length: f64,
    stiffness: f64,
    tension: f64,
    state: usize,
}

impl UniformString {
    /// Build a string at rest.
    ///
    /// Fails with `InvalidParameter` if `segment_count < 3` or any physical
    /// parameter is not a positive finite number. Nothing is allocated on
    /// failure.
    pub fn new(
        segment_count: usize,
        length: f64,
        mass_per_unit_length: f64,
        stiffness: f64,
        frequency: f64,
    ) -> Result<Self> {
        Self::from_config(&StringConfig {
            segment_count,
            length,
            mass_per_unit_length,
            stiffness,
            frequency,
        })
    }

    pub fn from_config(config: &StringConfig) -> Result<Self> {
        config.validate()?;

        let count = config.segment_count;
        let rest_length = config.length / (count - 1) as f64;
        let mass = config.mass_per_unit_length * config.length / count as f64;
        let tension = config.tension();

        let segments = (0..count)
            .map(|i| StringSegment::new(rest_length, mass, i == 0 || i == count - 1))
            .collect();

        debug!(
            segments = count,
            tension,
            rest_length,
            mass,
            "string constructed"
        );

        Ok(Self {
            segments,
            length: config.length,
            mass_per_unit_length: config.mass_per_unit_length,
            stiffness: config.stiffness,
            tension,
            state: 0,
        })
    }

    /// Integrate every segment forward by `dt` seconds and flip the current slot.
    pub fn advance_to_next_iteration(&mut self, dt: f64) {
        let cur = self.state;
        let next = 1 - cur;
        let last = self.segments.len() - 1;

        for i in 1..last {
            let (left, here, right) = (
                &self.segments[i - 1],
                &self.segments[i],
                &self.segments[i + 1],
            );
            if here.is_node {
                continue;
            }

            let d = here.displacement[cur];
            let v = here.velocity[cur];

            let dx1 = left.length;
            let dy1 = left.displacement[cur] - d;
            let l1 = dx1.hypot(dy1);

            let dx2 = here.length;
            let dy2 = right.displacement[cur] - d;
            let l2 = dx2.hypot(dy2);

            let pull1 = (l1 - dx1) / self.stiffness + self.tension;
            let pull2 = (l2 - dx2) / self.stiffness + self.tension;
            let a = (pull1 * dy1 / l1 + pull2 * dy2 / l2) / here.mass;

            let seg = &mut self.segments[i];
            seg.acceleration = a;
            seg.velocity[next] = v + dt * a;
            seg.displacement[next] = d + dt * v + 0.5 * dt * dt * a;
        }

        for seg in self.segments.iter_mut().filter(|s| s.is_node) {
            seg.clamp(next);
        }

        self.state = next;
    }

    /// Shape the string as a triangle peaking at `position` (0..1 along the
    /// string) with height `amplitude`, at rest.
    pub fn pluck(&mut self, position: f64, amplitude: f64) -> Result<()> {
        if !(position > 0.0 && position < 1.0) {
            return Err(DspError::invalid(
                "position",
                format!("pluck position must lie strictly inside (0, 1), got {position}"),
            ));
        }
        if !amplitude.is_finite() {
            return Err(DspError::invalid(
                "amplitude",
                format!("expected a finite amplitude, got {amplitude}"),
            ));
        }

        let cur = self.state;
        let span = (self.segments.len() - 1) as f64;
        for (i, seg) in self.segments.iter_mut().enumerate() {
            if seg.is_node {
                continue;
            }
            let x = i as f64 / span;
            let shape = if x <= position {
                x / position
            } else {
                (1.0 - x) / (1.0 - position)
            };
            seg.displacement[cur] = amplitude * shape;
            seg.velocity[cur] = 0.0;
        }

        debug!(position, amplitude, "string plucked");
        Ok(())
    }

    /// Move a single interior segment to `value` in the current slot.
    pub fn set_displacement(&mut self, index: usize, value: f64) -> Result<()> {
        let count = self.segments.len();
        let cur = self.state;
        match self.segments.get_mut(index) {
            None => Err(DspError::invalid(
                "index",
                format!("segment {index} out of range for {count} segments"),
            )),
            Some(seg) if seg.is_node => Err(DspError::invalid(
                "index",
                format!("segment {index} is a clamped node"),
            )),
            Some(seg) => {
                seg.displacement[cur] = value;
                Ok(())
            }
        }
    }

    /// Put the string back at rest.
    pub fn reset(&mut self) {
        for seg in &mut self.segments {
            seg.reset();
        }
        self.state = 0;
    }

    /// Courant-like bound on `dt`, sqrt(mass / (tension / rest_length)).
    ///
    /// The explicit step gains a little energy every iteration. Well below
    /// this bound the growth stays slow; near or above it the string blows up
    /// within a handful of steps.
    pub fn stable_time_step(&self) -> f64 {
        let seg = &self.segments[0];
        (seg.mass / (self.tension / seg.length)).sqrt()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[StringSegment] {
        &self.segments
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn mass_per_unit_length(&self) -> f64 {
        self.mass_per_unit_length
    }

    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    pub fn tension(&self) -> f64 {
        self.tension
    }

    /// Index (0 or 1) of the slot holding the current generation.
    pub fn state(&self) -> usize {
        self.state
    }

    pub fn displacement(&self, index: usize) -> Option<f64> {
        self.segments.get(index).map(|s| s.displacement[self.state])
    }

    pub fn velocity(&self, index: usize) -> Option<f64> {
        self.segments.get(index).map(|s| s.velocity[self.state])
    }

    /// Largest absolute displacement in the current slot. NaN segments are skipped.
    pub fn max_displacement(&self) -> f64 {
        self.segments
            .iter()
            .map(|s| s.displacement[self.state].abs())
            .fold(0.0, f64::max)
    }

    /// Sum of 1/2 m v^2 over the current slot.
    pub fn kinetic_energy(&self) -> f64 {
        self.segments
            .iter()
            .map(|s| {
                let v = s.velocity[self.state];
                0.5 * s.mass * v * v
            })
            .sum()
    }
}
