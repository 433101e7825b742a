//! The client-held shopping cart.
//!
//! A cart is an ordered list of flower IDs kept in the `cart` cookie as a
//! comma-joined string such as `3,3,7`. Repeated IDs mean repeated units;
//! checkout records one purchase per entry.

use core::fmt;

use crate::FlowerId;

/// Errors that can occur when parsing a [`Cart`] cookie value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// An entry between commas is not a flower ID.
    #[error("invalid cart entry at position {position}: {entry:?}")]
    InvalidEntry {
        /// Zero-based position of the bad entry.
        position: usize,
        /// The raw entry text.
        entry: String,
    },
}

/// Flower IDs pending purchase, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<FlowerId>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Parse a cookie value.
    ///
    /// An empty (or all-whitespace) value is an empty cart.
    ///
    /// ```
    /// use flowershop_core::{Cart, FlowerId};
    ///
    /// let cart = Cart::parse("3,3").unwrap();
    /// assert_eq!(cart.len(), 2);
    /// assert!(cart.iter().all(|id| id == FlowerId::new(3)));
    /// assert!(Cart::parse("").unwrap().is_empty());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidEntry`] if any entry is not an integer.
    pub fn parse(value: &str) -> Result<Self, CartError> {
        if value.trim().is_empty() {
            return Ok(Self::new());
        }

        let items = value
            .split(',')
            .enumerate()
            .map(|(position, entry)| {
                entry.parse::<FlowerId>().map_err(|_| CartError::InvalidEntry {
                    position,
                    entry: entry.to_owned(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { items })
    }

    /// Append one unit of a flower.
    pub fn push(&mut self, flower_id: FlowerId) {
        self.items.push(flower_id);
    }

    /// Whether the cart holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of entries, counting duplicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = FlowerId> + '_ {
        self.items.iter().copied()
    }
}

/// Renders the cookie value form, e.g. `3,3,7`.
impl fmt::Display for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

impl FromIterator<FlowerId> for Cart {
    fn from_iter<T: IntoIterator<Item = FlowerId>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_push_onto_empty_twice() {
        let mut cart = Cart::parse("").unwrap();
        cart.push(FlowerId::new(3));
        cart.push(FlowerId::new(3));
        assert_eq!(cart.to_string(), "3,3");
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_parse_preserves_order_and_duplicates() {
        let cart = Cart::parse("7,3,7").unwrap();
        let ids: Vec<i64> = cart.iter().map(|id| id.as_i64()).collect();
        assert_eq!(ids, vec![7, 3, 7]);
    }

    #[test]
    fn test_parse_tolerates_spaces_around_entries() {
        let cart = Cart::parse("1, 2").unwrap();
        assert_eq!(cart.to_string(), "1,2");
    }

    #[test]
    fn test_parse_rejects_bad_entry() {
        let err = Cart::parse("1,rose,3").unwrap_err();
        assert_eq!(
            err,
            CartError::InvalidEntry {
                position: 1,
                entry: "rose".to_owned()
            }
        );
    }

    #[test]
    fn test_parse_rejects_empty_entry() {
        assert!(Cart::parse("1,,2").is_err());
    }

    #[test]
    fn test_empty_cart_renders_empty_string() {
        assert_eq!(Cart::new().to_string(), "");
    }
}
