//! Erlang-B traffic and blocking model.
//!
//! The blocked-calls-cleared model: offered traffic arrives Poisson, a call
//! finding all channels busy is lost, no queueing and no retry. The blocking
//! probability is evaluated with the numerically stable recurrence rather
//! than the factorial closed form, which overflows long before realistic
//! channel counts.

/// Probability that a call is blocked, given offered traffic (Erlangs) and
/// the number of channels.
///
/// Runs the recurrence `B0 = 1`, `Bi = A*B / (i + A*B)` up to `channels`.
/// With zero channels the recurrence body never executes and the identity
/// value 1 comes back: a system with no channels blocks everything.
pub fn blocking_probability(traffic_erlangs: f64, channels: u32) -> f64 {
    let a = traffic_erlangs;
    let mut b = 1.0;

    for i in 1..=channels {
        b = (a * b) / (f64::from(i) + a * b);
    }

    b
}

/// Capacity actually served once blocking is accounted for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Capacity {
    /// Blocking probability, in [0, 1].
    pub blocking_probability: f64,

    /// Channels effectively carrying traffic: `channels * (1 - B)`.
    pub effective_channels: f64,
}

impl Capacity {
    /// Evaluates the traffic model for one site's load and channel count.
    pub fn of(traffic_erlangs: f64, channels: u32) -> Self {
        let blocking = blocking_probability(traffic_erlangs, channels);

        Self {
            blocking_probability: blocking,
            effective_channels: f64::from(channels) * (1.0 - blocking),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_channels_blocks_everything() {
        assert_eq!(blocking_probability(0.0, 0), 1.0);
        assert_eq!(blocking_probability(25.0, 0), 1.0);
        assert_eq!(Capacity::of(25.0, 0).effective_channels, 0.0);
    }

    #[test]
    fn zero_traffic_never_blocks() {
        for channels in 1..=64 {
            assert_eq!(blocking_probability(0.0, channels), 0.0);
        }
    }

    #[test]
    fn matches_directly_iterated_recurrence() {
        // Reference value produced by spelling the recurrence out step by
        // step, so the comparison exercises the exact same arithmetic.
        let a = 25.0;
        let mut reference = 1.0;
        for i in 1..=8u32 {
            reference = (a * reference) / (f64::from(i) + a * reference);
        }

        assert_eq!(blocking_probability(25.0, 8), reference);
        // Sanity: 25 E offered to 8 channels is heavily blocked.
        assert_relative_eq!(reference, 0.6962, max_relative = 1e-3);
    }

    #[test]
    fn effective_capacity_never_exceeds_channels() {
        for &traffic in &[0.0, 0.5, 5.0, 25.0, 400.0] {
            for channels in 0..=32 {
                let capacity = Capacity::of(traffic, channels);
                assert!(capacity.effective_channels <= f64::from(channels));
                assert!(capacity.blocking_probability >= 0.0);
                assert!(capacity.blocking_probability <= 1.0);
            }
        }
    }

    #[test]
    fn more_channels_means_less_blocking() {
        let mut previous = 1.0;
        for channels in 1..=32 {
            let b = blocking_probability(25.0, channels);
            assert!(b < previous);
            previous = b;
        }
    }
}
