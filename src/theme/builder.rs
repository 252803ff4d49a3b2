//! Role pairs with readable foregrounds, serialized as the published CSS variable set.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::theme::{
    color::ColorValue,
    contrast::ContrastEnforcer,
    mapper::{RoleColors, map_roles},
    swatch::Palette,
};

/// Semantic roles published to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Main brand color.
    Primary,
    /// Light companion color.
    Secondary,
    /// Dark companion color.
    Accent,
}

impl Role {
    /// Roles in publication order.
    pub const ALL: [Role; 3] = [Role::Primary, Role::Secondary, Role::Accent];

    /// Variable name of the role background.
    pub const fn name(&self) -> &'static str {
        match self {
            Role::Primary => "primary",
            Role::Secondary => "secondary",
            Role::Accent => "accent",
        }
    }

    /// Variable name of the paired foreground.
    pub const fn foreground_name(&self) -> &'static str {
        match self {
            Role::Primary => "primary-foreground",
            Role::Secondary => "secondary-foreground",
            Role::Accent => "accent-foreground",
        }
    }

    /// Starting foreground guess: white on the (usually saturated) primary and
    /// accent, the dark neutral on the (usually light) secondary.
    const fn foreground_guess(&self) -> ColorValue {
        match self {
            Role::Primary | Role::Accent => ColorValue::WHITE,
            Role::Secondary => ColorValue::NEAR_BLACK,
        }
    }
}

/// Background/foreground pair for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RolePair {
    /// Role color.
    pub background: ColorValue,
    /// Readable color drawn on top of it.
    pub foreground: ColorValue,
}

/// Every role with its paired foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleAssignment {
    /// Primary pair.
    pub primary: RolePair,
    /// Secondary pair.
    pub secondary: RolePair,
    /// Accent pair.
    pub accent: RolePair,
}

impl RoleAssignment {
    /// Pair for `role`.
    pub fn pair(&self, role: Role) -> RolePair {
        match role {
            Role::Primary => self.primary,
            Role::Secondary => self.secondary,
            Role::Accent => self.accent,
        }
    }
}

/// Published theme: variable name to bare `H S% L%` triplet, in publication order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeVariableSet(IndexMap<String, String>);

impl ThemeVariableSet {
    /// Name of the focus-ring alias.
    pub const RING: &'static str = "ring";

    /// Value of a variable.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Variables in publication order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the empty set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// CSS custom properties (`--primary`, ...) with their values.
    pub fn css_properties(&self) -> impl Iterator<Item = (String, &str)> {
        self.iter().map(|(name, value)| (format!("--{name}"), value))
    }

    /// Render as a `:root { ... }` rule.
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (property, value) in self.css_properties() {
            css.push_str(&format!("  {property}: {value};\n"));
        }
        css.push_str("}\n");
        css
    }

    fn insert(&mut self, name: &str, color: ColorValue) {
        self.0.insert(name.to_string(), color.to_hsl().to_string());
    }
}

impl From<&RoleAssignment> for ThemeVariableSet {
    fn from(assignment: &RoleAssignment) -> Self {
        let mut set = ThemeVariableSet::default();
        for role in Role::ALL {
            let pair = assignment.pair(role);
            set.insert(role.name(), pair.background);
            set.insert(role.foreground_name(), pair.foreground);
        }
        set.insert(Self::RING, assignment.primary.background);
        set
    }
}

/// Turns a palette into a publishable variable set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeBuilder {
    enforcer: ContrastEnforcer,
}

impl ThemeBuilder {
    /// Builder using `enforcer` for every foreground.
    pub fn new(enforcer: ContrastEnforcer) -> Self {
        Self { enforcer }
    }

    /// Contrast settings in use.
    pub fn enforcer(&self) -> ContrastEnforcer {
        self.enforcer
    }

    /// Resolve roles and pair each with a readable foreground.
    pub fn assign(&self, palette: &Palette) -> RoleAssignment {
        let RoleColors {
            primary,
            secondary,
            accent,
        } = map_roles(palette);

        let pair = |role: Role, background: ColorValue| RolePair {
            background,
            foreground: self.enforcer.ensure(background, role.foreground_guess()),
        };

        RoleAssignment {
            primary: pair(Role::Primary, primary),
            secondary: pair(Role::Secondary, secondary),
            accent: pair(Role::Accent, accent),
        }
    }

    /// Full variable set for `palette`. Same palette in, same set out.
    pub fn build(&self, palette: &Palette) -> ThemeVariableSet {
        ThemeVariableSet::from(&self.assign(palette))
    }
}
