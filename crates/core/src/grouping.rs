//! Grouping: a named category of regions sharing one superset region
//!
//! ## Roles
//!
//! | Role | Code |
//! |------|------|
//! | Ordinary | 0 |
//! | Processor | 1 |
//! | Block | 2 |
//! | Domain | 3 |
//! | Assembly | 4 |
//! | Material | 5 |
//! | Boundary | 6 |
//! | Species | 7 |
//! | Enumeration | 8 |
//! | UserDefined | 9 |
//!
//! Codes are part of the attribute form and must not change.

use crate::error::{Error, Result};
use crate::member_set::MemberSet;
use crate::types::Handle;
use std::fmt;

/// What a grouping's members represent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Plain topological decomposition
    #[default]
    Ordinary,
    /// One member per processor
    Processor,
    /// Mesh blocks
    Block,
    /// Domains
    Domain,
    /// Assemblies of parts
    Assembly,
    /// Materials
    Material,
    /// Boundaries
    Boundary,
    /// Species within a material
    Species,
    /// Enumerated scalar selection
    Enumeration,
    /// Producer-defined
    UserDefined,
}

impl Role {
    /// All roles (for iteration)
    pub const ALL: [Role; 10] = [
        Role::Ordinary,
        Role::Processor,
        Role::Block,
        Role::Domain,
        Role::Assembly,
        Role::Material,
        Role::Boundary,
        Role::Species,
        Role::Enumeration,
        Role::UserDefined,
    ];

    /// Stable wire code
    pub const fn code(&self) -> i32 {
        match self {
            Role::Ordinary => 0,
            Role::Processor => 1,
            Role::Block => 2,
            Role::Domain => 3,
            Role::Assembly => 4,
            Role::Material => 5,
            Role::Boundary => 6,
            Role::Species => 7,
            Role::Enumeration => 8,
            Role::UserDefined => 9,
        }
    }

    /// Parse a wire code
    pub fn from_code(code: i32) -> Result<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Role::ALL.get(idx).copied())
            .ok_or_else(|| Error::Serialization(format!("unknown role code {}", code)))
    }

    /// Human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Role::Ordinary => "ordinary",
            Role::Processor => "processor",
            Role::Block => "block",
            Role::Domain => "domain",
            Role::Assembly => "assembly",
            Role::Material => "material",
            Role::Boundary => "boundary",
            Role::Species => "species",
            Role::Enumeration => "enumeration",
            Role::UserDefined => "user-defined",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A category + role bundle over a superset region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouping {
    category: String,
    role: Role,
    superset: Handle,
    members: MemberSet,
}

impl Grouping {
    /// Create a grouping
    pub fn new(category: impl Into<String>, role: Role, superset: Handle, members: MemberSet) -> Self {
        Grouping {
            category: category.into(),
            role,
            superset,
            members,
        }
    }

    /// Category name (e.g. "materials")
    pub fn category(&self) -> &str {
        &self.category
    }

    /// What the members represent
    pub fn role(&self) -> Role {
        self.role
    }

    /// Handle of the region every member is a subset of
    pub fn superset(&self) -> Handle {
        self.superset
    }

    /// Member region handles
    pub fn members(&self) -> &MemberSet {
        &self.members
    }

    /// Whether `region` is a member
    pub fn contains(&self, region: Handle) -> bool {
        self.members.contains(region)
    }
}
