//! Applying a pool formula to dice that were already rolled.

use serde::Serialize;

use super::{DIE_SIDES, PoolFormula};
use crate::error::{MechError, MechResult};

/// One die of an evaluated pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RolledDie {
    /// Face value (1 to 6).
    pub value: u32,
    /// False if the die was among the lowest dropped.
    pub kept: bool,
}

/// The result of evaluating a pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PoolRoll {
    /// Dice in the order they were supplied.
    pub dice: Vec<RolledDie>,
    /// Flat modifier.
    pub flat: i64,
}

impl PoolRoll {
    /// Sum of kept dice plus the flat modifier.
    pub fn total(&self) -> i64 {
        let kept: i64 = self
            .dice
            .iter()
            .filter(|d| d.kept)
            .map(|d| i64::from(d.value))
            .sum();
        kept + self.flat
    }

    /// Values of the kept dice.
    pub fn kept(&self) -> Vec<u32> {
        self.dice.iter().filter(|d| d.kept).map(|d| d.value).collect()
    }

    /// Values of the dropped dice.
    pub fn dropped(&self) -> Vec<u32> {
        self.dice.iter().filter(|d| !d.kept).map(|d| d.value).collect()
    }
}

impl std::fmt::Display for PoolRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self
            .dice
            .iter()
            .map(|d| {
                if d.kept {
                    d.value.to_string()
                } else {
                    format!("({})", d.value)
                }
            })
            .collect();
        write!(f, "[{}]", values.join(", "))?;
        match self.flat {
            0 => {}
            n if n > 0 => write!(f, " + {n}")?,
            n => write!(f, " - {}", n.unsigned_abs())?,
        }
        write!(f, " = {}", self.total())
    }
}

impl PoolFormula {
    /// Evaluate the formula against supplied faces, one per die.
    ///
    /// The lowest faces are dropped; among equal faces the earlier die is
    /// dropped first.
    pub fn evaluate(&self, faces: &[u32]) -> MechResult<PoolRoll> {
        if u64::try_from(faces.len()).ok() != Some(self.dice()) {
            return Err(MechError::Engine(format!(
                "{self} needs {} dice, got {}",
                self.dice(),
                faces.len()
            )));
        }
        if let Some(bad) = faces.iter().find(|v| !(1..=DIE_SIDES).contains(*v)) {
            return Err(MechError::Engine(format!(
                "face {bad} is not on a d{DIE_SIDES}"
            )));
        }

        let mut order: Vec<usize> = (0..faces.len()).collect();
        order.sort_by_key(|&i| faces[i]);
        let mut kept = vec![true; faces.len()];
        let drop = usize::try_from(self.drop()).unwrap_or(usize::MAX);
        for &i in order.iter().take(drop) {
            kept[i] = false;
        }

        Ok(PoolRoll {
            dice: faces
                .iter()
                .zip(kept)
                .map(|(&value, kept)| RolledDie { value, kept })
                .collect(),
            flat: self.flat(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_lowest_and_adds_flat() {
        let roll = PoolFormula::new(4, 2, 1).evaluate(&[3, 6, 1, 4]).unwrap();
        assert_eq!(roll.kept(), vec![6, 4]);
        assert_eq!(roll.dropped(), vec![3, 1]);
        assert_eq!(roll.total(), 11);
        assert_eq!(roll.to_string(), "[(3), 6, (1), 4] + 1 = 11");
    }

    #[test]
    fn ties_drop_earlier_die() {
        let roll = PoolFormula::new(3, 1, 0).evaluate(&[2, 2, 5]).unwrap();
        assert!(!roll.dice[0].kept);
        assert!(roll.dice[1].kept);
        assert_eq!(roll.total(), 7);
    }

    #[test]
    fn empty_pool_is_just_the_modifier() {
        let roll = PoolFormula::empty(-2).evaluate(&[]).unwrap();
        assert_eq!(roll.total(), -2);
        assert_eq!(roll.to_string(), "[] - 2 = -2");
    }

    #[test]
    fn wrong_face_count_is_an_error() {
        assert!(matches!(
            PoolFormula::new(3, 0, 0).evaluate(&[1, 2]),
            Err(MechError::Engine(_))
        ));
    }

    #[test]
    fn faces_must_be_on_a_d6() {
        assert!(PoolFormula::new(2, 0, 0).evaluate(&[0, 3]).is_err());
        assert!(PoolFormula::new(2, 0, 0).evaluate(&[7, 3]).is_err());
    }
}
