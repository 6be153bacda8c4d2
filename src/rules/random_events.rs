//! Small surprises that nudge base power between story segments.

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomEvent {
    pub description: &'static str,
    pub power_effect: i32,
}

pub static RANDOM_EVENTS: &[RandomEvent] = &[
    RandomEvent {
        description: "You find a sealed energy bar in an abandoned shipping container and feel a little stronger.",
        power_effect: 2,
    },
    RandomEvent {
        description: "A hidden plasma trap in a back alley gives you a nasty jolt.",
        power_effect: -2,
    },
    RandomEvent {
        description: "A cracked data chip holds an ancient combat routine. Something clicks.",
        power_effect: 3,
    },
    RandomEvent {
        description: "Sudden acid rain soaks your gear and shorts out some of its functions.",
        power_effect: -3,
    },
    RandomEvent {
        description: "A friendly merchant bot hands you a spare battery.",
        power_effect: 1,
    },
    RandomEvent {
        description: "You breathe in an unidentified gas and the world spins for a moment.",
        power_effect: -1,
    },
];

/// Rolls for a random event; `None` when the roll misses `chance`.
pub fn roll_random_event(chance: f64, rng: &mut impl Rng) -> Option<&'static RandomEvent> {
    if rng.gen::<f64>() >= chance {
        return None;
    }
    Some(&RANDOM_EVENTS[rng.gen_range(0..RANDOM_EVENTS.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_zero_chance_never_fires() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        for _ in 0..1000 {
            assert!(roll_random_event(0.0, &mut rng).is_none());
        }
    }

    #[test]
    fn test_certain_chance_always_fires() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        for _ in 0..100 {
            assert!(roll_random_event(1.0, &mut rng).is_some());
        }
    }

    #[test]
    fn test_chance_is_roughly_respected() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let fired = (0..10_000)
            .filter(|_| roll_random_event(0.2, &mut rng).is_some())
            .count();
        assert!((1700..2300).contains(&fired), "fired {} times", fired);
    }

    #[test]
    fn test_effects_are_balanced() {
        let sum: i32 = RANDOM_EVENTS.iter().map(|e| e.power_effect).sum();
        assert_eq!(sum, 0);
    }
}
