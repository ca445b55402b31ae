//! Collection wrapper types for displaying lists.

use std::{fmt, ops::Index};

use crate::world::{EntityListing, PageAction};

/// Buildings listed on the construction screen.
///
/// # Examples
///
/// ```rust
/// use mason_core::{display::Entities, world::EntityListing};
///
/// let entities = Entities(vec![EntityListing {
///     id: "wood_pit".to_string(),
///     display_name: "Timber camp".to_string(),
///     current_level_label: "Level 3".to_string(),
/// }]);
/// assert!(entities.to_string().contains("Timber camp"));
/// ```
pub struct Entities(pub Vec<EntityListing>);

impl Entities {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of buildings in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the buildings.
    pub fn iter(&self) -> std::slice::Iter<'_, EntityListing> {
        self.0.iter()
    }
}

impl Index<usize> for Entities {
    type Output = EntityListing;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Entities {
    type Item = &'a EntityListing;
    type IntoIter = std::slice::Iter<'a, EntityListing>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Entities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No upgradable buildings found.")
        } else {
            for entity in &self.0 {
                write!(f, "{entity}")?;
            }
            Ok(())
        }
    }
}

/// Page actions a tick left for the host to perform.
pub struct PageActions(pub Vec<PageAction>);

impl fmt::Display for PageActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No page actions.");
        }
        writeln!(f, "## Page actions")?;
        writeln!(f)?;
        for action in &self.0 {
            match action {
                PageAction::Order {
                    building,
                    discounted,
                    href,
                } => {
                    let pathway = if *discounted { "discounted" } else { "standard" };
                    writeln!(f, "- Order **{building}** ({pathway}): `{href}`")?;
                }
                PageAction::Reduce {
                    slot: Some(slot),
                    href,
                } => writeln!(f, "- Reduce slot {slot}: `{href}`")?,
                PageAction::Reduce { slot: None, href } => {
                    writeln!(f, "- Reduce latest order: `{href}`")?;
                }
                PageAction::ReduceLatestAfterLoad => {
                    writeln!(f, "- Reduce the new order once the page has reloaded")?;
                }
            }
        }
        Ok(())
    }
}

/// Managed contexts with a stored plan.
pub struct Contexts(pub Vec<String>);

impl fmt::Display for Contexts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No stored plans.")
        } else {
            for context in &self.0 {
                writeln!(f, "- {context}")?;
            }
            Ok(())
        }
    }
}
