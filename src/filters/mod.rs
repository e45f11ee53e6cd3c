//! Template filters available in Tera templates
//!
//! Templates are written against a fixed set of filter names, so the set
//! is assembled once as an immutable [`FilterBindings`] value and handed
//! to whatever template engine instance needs it. Filters take their
//! input permissively and degrade to empty output rather than failing a
//! whole site build over one odd value.

mod array;
mod date;
mod nav;
mod reading_time;

use std::collections::HashMap;

use indexmap::IndexMap;
use tera::{Tera, Value};

pub use array::{filter_by_category, slice};
pub use date::date;
pub use nav::{get_next, get_previous};
pub use reading_time::reading_time;

/// Signature shared by all template filters
pub type FilterFn = fn(&Value, &HashMap<String, Value>) -> tera::Result<Value>;

/// The filter names templates rely on, bound to their implementations.
///
/// Built once by [`bindings`] and never mutated afterwards; installation
/// into an engine is a read-only walk over the map.
pub struct FilterBindings {
    filters: IndexMap<&'static str, FilterFn>,
}

impl FilterBindings {
    /// Filter names in registration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.filters.keys().copied()
    }

    /// Register every filter on a Tera instance
    pub fn install(&self, tera: &mut Tera) {
        for (name, filter) in &self.filters {
            tera.register_filter(name, *filter);
        }
    }
}

/// Build the filter set templates are written against
pub fn bindings() -> FilterBindings {
    let mut filters: IndexMap<&'static str, FilterFn> = IndexMap::new();
    filters.insert("date", date);
    filters.insert("readingTime", reading_time);
    filters.insert("filterByCategory", filter_by_category);
    filters.insert("slice", slice);
    filters.insert("getPrevious", get_previous);
    filters.insert("getNext", get_next);
    FilterBindings { filters }
}
