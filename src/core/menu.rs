use std::collections::{BTreeMap, HashMap};

use log::debug;

use super::errors::SchedulerError;

/// Temporary preparation-time override for one menu item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Special {
    pub prep_minutes: u32,
    /// Resolutions left before the base time applies again
    pub remaining_uses: u32,
}

/// Base preparation times plus any active specials.
///
/// Specials never modify `base`; an item without a base entry is not served.
#[derive(Debug, Clone, Default)]
pub struct MenuCatalog {
    base: BTreeMap<String, u32>,
    specials: HashMap<String, Special>,
}

impl MenuCatalog {
    /// Build a catalog from `(item, minutes)` pairs
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            base: items.into_iter().map(|(name, minutes)| (name.into(), minutes)).collect(),
            specials: HashMap::new(),
        }
    }

    /// Base preparation time, ignoring specials
    pub fn lookup(&self, item: &str) -> Result<u32, SchedulerError> {
        self.base
            .get(item)
            .copied()
            .ok_or_else(|| SchedulerError::UnknownItem(item.to_string()))
    }

    /// Preparation time for a new order of `item`.
    ///
    /// An active special wins and loses one use; it is dropped once its uses
    /// hit zero.
    pub fn resolve_prep_time(&mut self, item: &str) -> Result<u32, SchedulerError> {
        let base = self.lookup(item)?;
        let Some(special) = self.specials.get_mut(item) else {
            return Ok(base);
        };

        let minutes = special.prep_minutes;
        special.remaining_uses -= 1;
        debug!(
            "[Menu] Applied special for {} ({} min, {} uses left)",
            item, minutes, special.remaining_uses
        );
        if special.remaining_uses == 0 {
            self.specials.remove(item);
            debug!("[Menu] Special for {} expired", item);
        }
        Ok(minutes)
    }

    /// Register or replace the special for `item`
    pub fn set_special(&mut self, item: &str, prep_minutes: i64, uses: i64) -> Result<(), SchedulerError> {
        self.lookup(item)?;
        let invalid = SchedulerError::InvalidSpecial { prep_minutes, uses };
        let prep = u32::try_from(prep_minutes).map_err(|_| invalid.clone())?;
        let uses = u32::try_from(uses).map_err(|_| invalid.clone())?;
        if prep == 0 || uses == 0 {
            return Err(invalid);
        }

        self.specials.insert(
            item.to_string(),
            Special {
                prep_minutes: prep,
                remaining_uses: uses,
            },
        );
        Ok(())
    }

    pub fn special(&self, item: &str) -> Option<&Special> {
        self.specials.get(item)
    }

    /// Base menu sorted by item name
    pub fn items(&self) -> impl Iterator<Item = (&str, u32)> {
        self.base.iter().map(|(name, minutes)| (name.as_str(), *minutes))
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }
}
