use super::{ParticipantIndex, Round, RoundValue};

/// Running totals for one participant across the series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticipantAggregate {
    pub won_count: u32,
    pub lost_count: u32,
    pub base_points: i64,
    pub total_points: i64,
}

/// What a single completed round adds to the aggregates.
///
/// Applying and reverting the same contribution are exact inverses, which is
/// what keeps round edits free of drift.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contribution {
    pub player: ParticipantIndex,
    pub won: bool,
    pub value: RoundValue,
}

impl Contribution {
    /// Contribution recorded on a completed round.
    ///
    /// Passed rounds and rounds without a stored value contribute nothing.
    pub fn of(round: &Round) -> Option<Self> {
        if !round.completed || round.is_passed() {
            return None;
        }
        Some(Self {
            player: round.player?,
            won: round.won,
            value: round.awarded?,
        })
    }

    pub fn apply(&self, aggregates: &mut [ParticipantAggregate]) {
        let base = i64::from(self.value.base_points.abs());
        let total = i64::from(self.value.total_points.abs());
        let bonus = i64::from(self.value.defender_bonus);

        for (seat, aggregate) in aggregates.iter_mut().enumerate() {
            if seat == self.player.index() {
                if self.won {
                    aggregate.won_count += 1;
                    aggregate.base_points += base;
                    aggregate.total_points += total;
                } else {
                    aggregate.lost_count += 1;
                    aggregate.base_points -= base;
                    aggregate.total_points -= total;
                }
            } else if !self.won {
                aggregate.total_points += bonus;
            }
        }
    }

    pub fn revert(&self, aggregates: &mut [ParticipantAggregate]) {
        let base = i64::from(self.value.base_points.abs());
        let total = i64::from(self.value.total_points.abs());
        let bonus = i64::from(self.value.defender_bonus);

        for (seat, aggregate) in aggregates.iter_mut().enumerate() {
            if seat == self.player.index() {
                if self.won {
                    debug_assert!(aggregate.won_count > 0, "won_count underflow on revert");
                    aggregate.won_count = aggregate.won_count.saturating_sub(1);
                    aggregate.base_points -= base;
                    aggregate.total_points -= total;
                } else {
                    debug_assert!(aggregate.lost_count > 0, "lost_count underflow on revert");
                    aggregate.lost_count = aggregate.lost_count.saturating_sub(1);
                    aggregate.base_points += base;
                    aggregate.total_points += total;
                }
            } else if !self.won {
                aggregate.total_points -= bonus;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::GameType;

    fn lost_contribution() -> Contribution {
        Contribution {
            player: ParticipantIndex(1),
            won: false,
            value: RoundValue {
                base_points: -72,
                total_points: -122,
                defender_bonus: 40,
            },
        }
    }

    #[test]
    fn loss_debits_player_and_credits_defenders() {
        let mut aggregates = [ParticipantAggregate::default(); 3];
        lost_contribution().apply(&mut aggregates);

        assert_eq!(aggregates[1].lost_count, 1);
        assert_eq!(aggregates[1].base_points, -72);
        assert_eq!(aggregates[1].total_points, -122);
        assert_eq!(aggregates[0].total_points, 40);
        assert_eq!(aggregates[2].total_points, 40);
        assert_eq!(aggregates[0].base_points, 0);
    }

    #[test]
    fn revert_undoes_apply() {
        let mut aggregates = [ParticipantAggregate::default(); 3];
        aggregates[0].won_count = 2;
        aggregates[0].total_points = 150;
        let before = aggregates;

        let contribution = lost_contribution();
        contribution.apply(&mut aggregates);
        contribution.revert(&mut aggregates);

        assert_eq!(aggregates, before);
    }

    #[test]
    fn passed_round_contributes_nothing() {
        let mut round = Round::new(1, ParticipantIndex(0));
        round.game_type = Some(GameType::Passed);
        round.completed = true;
        round.awarded = Some(RoundValue::ZERO);

        assert_eq!(Contribution::of(&round), None);
    }
}
