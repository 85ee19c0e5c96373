//! Sums of signal components.
//!
//! `a + b + c` builds the left-leaning tree `((a + b) + c)`. The tree owns its
//! children and is never modified after construction, apart from attaching a
//! sampling context.

use std::fmt;
use std::ops::Add;

use crate::active_region::ActiveRegion;
use crate::component::SignalComponent;
use crate::error::SignalResult;
use crate::granulation::Granulation;
use crate::noise::WhiteNoise;
use crate::oscillation::Oscillation;
use crate::planet::Planet;
use crate::random_state::Draw;
use crate::samples::Samples;
use crate::sampling::SamplingContext;
use crate::trend::{Offset, Slope};

/// Sum of two components, itself a component
pub struct CompositeSignal {
    left: Box<dyn SignalComponent>,
    right: Box<dyn SignalComponent>,
    sampling: Option<SamplingContext>,
}

impl CompositeSignal {
    pub fn new<L, R>(left: L, right: R) -> Self
    where
        L: SignalComponent + 'static,
        R: SignalComponent + 'static,
    {
        Self::from_boxed(Box::new(left), Box::new(right))
    }

    pub fn from_boxed(left: Box<dyn SignalComponent>, right: Box<dyn SignalComponent>) -> Self {
        Self {
            left,
            right,
            sampling: None,
        }
    }

    pub fn left(&self) -> &dyn SignalComponent {
        self.left.as_ref()
    }

    pub fn right(&self) -> &dyn SignalComponent {
        self.right.as_ref()
    }

    /// Leaves of the tree: the right child, then down the left spine.
    ///
    /// For `a + b + c` this is `[c, b, a]`.
    pub fn components(&self) -> Vec<&dyn SignalComponent> {
        let mut leaves: Vec<&dyn SignalComponent> = vec![self.right.as_ref()];
        let mut node: &dyn SignalComponent = self.left.as_ref();
        while let Some(composite) = node.as_composite() {
            leaves.push(composite.right.as_ref());
            node = composite.left.as_ref();
        }
        leaves.push(node);
        leaves
    }
}

impl SignalComponent for CompositeSignal {
    fn sample_at(&mut self, times: &[f64], draw: Draw) -> SignalResult<Samples> {
        let left = self.left.sample_at(times, draw)?;
        let right = self.right.sample_at(times, draw)?;
        left.add(&right)
    }

    /// Own context first, then whichever child carries one
    fn sampling(&self) -> Option<&SamplingContext> {
        self.sampling
            .as_ref()
            .or_else(|| self.left.sampling())
            .or_else(|| self.right.sampling())
    }

    fn set_sampling(&mut self, sampling: SamplingContext) {
        self.sampling = Some(sampling);
    }

    fn condensed(&self) -> String {
        format!("{} + {}", self.left.condensed(), self.right.condensed())
    }

    fn as_composite(&self) -> Option<&CompositeSignal> {
        Some(self)
    }

    fn shortest_period(&self) -> Option<f64> {
        match (self.left.shortest_period(), self.right.shortest_period()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

impl fmt::Display for CompositeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \n+ {}", self.left, self.right)
    }
}

macro_rules! impl_signal_add {
    ($($component:ty),* $(,)?) => {
        $(
            impl<R: SignalComponent + 'static> Add<R> for $component {
                type Output = CompositeSignal;

                fn add(self, rhs: R) -> CompositeSignal {
                    CompositeSignal::new(self, rhs)
                }
            }
        )*
    };
}

impl_signal_add!(
    CompositeSignal,
    Planet,
    Offset,
    Slope,
    WhiteNoise,
    Granulation,
    Oscillation,
    ActiveRegion,
);
