/// One row of a piecewise scoring table
#[derive(Clone, Copy)]
pub struct Step<T: Copy> {
    pub label: &'static str,
    pub when: fn(T) -> bool,
    pub score: f64,
}

/// Ordered list of steps; the first row whose predicate holds wins.
///
/// An input no row accepts (e.g. NaN against range predicates) scores NaN,
/// which the matcher rejects as a non-finite sub-score.
#[derive(Clone, Copy)]
pub struct StepTable<T: Copy + 'static> {
    pub steps: &'static [Step<T>],
}

impl<T: Copy + 'static> StepTable<T> {
    #[inline]
    pub fn evaluate(&self, input: T) -> f64 {
        self.find(input).map_or(f64::NAN, |step| step.score)
    }

    /// Row chosen for `input`, if any
    #[inline]
    pub fn find(&self, input: T) -> Option<&'static Step<T>> {
        self.steps.iter().find(|step| (step.when)(input))
    }

    /// Label of the row chosen for `input`
    #[inline]
    pub fn label(&self, input: T) -> &'static str {
        self.find(input).map_or("unmatched", |step| step.label)
    }
}
