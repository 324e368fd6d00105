//! Array groups: lazily materialized region families
//!
//! An array group is equivalent to one grouping (superset = parent) plus
//! `count` member regions, but none of the members are stored. Each member
//! is synthesized from the naming scheme when queried.

use sil_core::{Grouping, Handle, MemberSet, Region, Role};

/// How member regions are named
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameScheme {
    /// `prefix` followed by a running number starting at `first_name`
    Prefixed {
        /// Text before the number
        prefix: String,
        /// Number used for the first member
        first_name: i32,
    },
    /// One explicit name per member
    Explicit(Vec<String>),
}

/// A procedurally described family of regions sharing one parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayGroup {
    parent: Handle,
    count: usize,
    names: NameScheme,
    use_unique_ids: bool,
    category: String,
    role: Role,
    first_region: Handle,
    collection: Handle,
}

impl ArrayGroup {
    /// Members named `prefix0`, `prefix1`, ...
    pub fn prefixed(parent: Handle, prefix: impl Into<String>, count: usize) -> Self {
        ArrayGroup {
            parent,
            count,
            names: NameScheme::Prefixed {
                prefix: prefix.into(),
                first_name: 0,
            },
            use_unique_ids: false,
            category: String::new(),
            role: Role::Ordinary,
            first_region: 0,
            collection: 0,
        }
    }

    /// Members with explicit names
    pub fn named(parent: Handle, names: Vec<String>) -> Self {
        ArrayGroup {
            parent,
            count: names.len(),
            names: NameScheme::Explicit(names),
            use_unique_ids: false,
            category: String::new(),
            role: Role::Ordinary,
            first_region: 0,
            collection: 0,
        }
    }

    /// Start the running number at `first_name` (prefixed scheme only)
    pub fn with_first_name(mut self, first_name: i32) -> Self {
        if let NameScheme::Prefixed { first_name: n, .. } = &mut self.names {
            *n = first_name;
        }
        self
    }

    /// Use the global handle as member identifier instead of the position
    pub fn with_unique_ids(mut self, use_unique_ids: bool) -> Self {
        self.use_unique_ids = use_unique_ids;
        self
    }

    /// Category and role of the equivalent grouping
    pub fn with_category(mut self, category: impl Into<String>, role: Role) -> Self {
        self.category = category.into();
        self.role = role;
        self
    }

    /// Parent region (superset of the equivalent grouping)
    pub fn parent(&self) -> Handle {
        self.parent
    }

    /// Number of member regions
    pub fn count(&self) -> usize {
        self.count
    }

    /// Naming scheme
    pub fn names(&self) -> &NameScheme {
        &self.names
    }

    /// Whether member identifiers are global handles
    pub fn use_unique_ids(&self) -> bool {
        self.use_unique_ids
    }

    /// Category of the equivalent grouping
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Role of the equivalent grouping
    pub fn role(&self) -> Role {
        self.role
    }

    /// First region handle reserved for the members
    pub fn first_region(&self) -> Handle {
        self.first_region
    }

    /// Handle of the equivalent grouping
    pub fn collection(&self) -> Handle {
        self.collection
    }

    pub(crate) fn assign_handles(&mut self, first_region: Handle, collection: Handle) {
        self.first_region = first_region;
        self.collection = collection;
    }

    /// Whether `region` is one of the members
    pub fn contains_region(&self, region: Handle) -> bool {
        region >= self.first_region && region - self.first_region < self.count
    }

    /// Name of member `offset`
    pub fn region_name(&self, offset: usize) -> String {
        match &self.names {
            NameScheme::Prefixed { prefix, first_name } => {
                format!("{}{}", prefix, i128::from(*first_name) + offset as i128)
            }
            NameScheme::Explicit(names) => names.get(offset).cloned().unwrap_or_default(),
        }
    }

    /// Identifier of member `offset`
    pub fn region_identifier(&self, offset: usize) -> i32 {
        let id = if self.use_unique_ids {
            self.first_region + offset
        } else {
            offset
        };
        i32::try_from(id).unwrap_or(i32::MAX)
    }

    /// Synthesize member `offset` without any map references
    pub fn region(&self, offset: usize) -> Region {
        Region::new(self.region_name(offset), self.region_identifier(offset))
    }

    /// Invert the naming scheme
    pub fn offset_of_name(&self, name: &str) -> Option<usize> {
        match &self.names {
            NameScheme::Prefixed { prefix, first_name } => {
                let digits = name.strip_prefix(prefix.as_str())?;
                let number: i128 = digits.parse().ok()?;
                // Reject spellings the scheme never produces ("07", "+7")
                if number.to_string() != digits {
                    return None;
                }
                let offset = usize::try_from(number.checked_sub(i128::from(*first_name))?).ok()?;
                (offset < self.count).then_some(offset)
            }
            NameScheme::Explicit(names) => names.iter().position(|n| n == name),
        }
    }

    /// The equivalent grouping
    pub fn grouping(&self) -> Grouping {
        Grouping::new(
            self.category.clone(),
            self.role,
            self.parent,
            MemberSet::range(self.first_region, self.count),
        )
    }
}
