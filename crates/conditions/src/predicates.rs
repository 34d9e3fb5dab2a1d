//! Built-in location predicates, looked up by the condition's `param`.
use crate::location::Location;
use serde_json::Value;

/// Reads one location signal as a comparable value.
pub type PredicateFn = fn(location: &dyn Location) -> Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    PageType,
    PostType,
    Post,
    Taxonomy,
    PageTemplate,
    UserRole,
    UserStatus,
    DeviceType,
    Url,
    PostDate,
    CurrentDate,
}

const PREDICATES: [Predicate; 11] = [
    Predicate::PageType,
    Predicate::PostType,
    Predicate::Post,
    Predicate::Taxonomy,
    Predicate::PageTemplate,
    Predicate::UserRole,
    Predicate::UserStatus,
    Predicate::DeviceType,
    Predicate::Url,
    Predicate::PostDate,
    Predicate::CurrentDate,
];

impl Predicate {
    /// Finds the predicate for a condition `param`.
    pub fn from_param(param: &str) -> Option<Self> {
        let param = param.trim();
        Self::all().find(|predicate| predicate.param() == param)
    }

    pub fn param(&self) -> &'static str {
        self.entry().0
    }

    /// Reads this predicate's value from the location.
    pub fn resolve(&self, location: &dyn Location) -> Value {
        (self.entry().1)(location)
    }

    pub fn all() -> impl Iterator<Item = Predicate> {
        PREDICATES.into_iter()
    }

    fn entry(&self) -> (&'static str, PredicateFn) {
        match self {
            Self::PageType => ("location_page_type", page_type),
            Self::PostType => ("location_post_type", post_type),
            Self::Post => ("location_post", post),
            Self::Taxonomy => ("location_taxonomy", taxonomy),
            Self::PageTemplate => ("location_page_template", page_template),
            Self::UserRole => ("user_role", user_role),
            Self::UserStatus => ("user_status", user_status),
            Self::DeviceType => ("location_device_type", device_type),
            Self::Url => ("location_url", url),
            Self::PostDate => ("post_date", post_date),
            Self::CurrentDate => ("current_date", current_date),
        }
    }
}

fn strings(items: Vec<String>) -> Value {
    Value::Array(items.into_iter().map(Value::String).collect())
}

fn optional(item: Option<String>) -> Value {
    item.map_or(Value::Null, Value::String)
}

fn page_type(location: &dyn Location) -> Value {
    strings(location.page_types())
}

fn post_type(location: &dyn Location) -> Value {
    optional(location.post_type())
}

fn post(location: &dyn Location) -> Value {
    location.post_id().map_or(Value::Null, Value::from)
}

fn taxonomy(location: &dyn Location) -> Value {
    strings(location.terms())
}

fn page_template(location: &dyn Location) -> Value {
    optional(location.page_template())
}

fn user_role(location: &dyn Location) -> Value {
    strings(location.user_roles())
}

fn user_status(location: &dyn Location) -> Value {
    let status = if location.is_logged_in() {
        "logged_in"
    } else {
        "logged_out"
    };
    Value::from(status)
}

fn device_type(location: &dyn Location) -> Value {
    Value::from(location.device_type().as_str())
}

fn url(location: &dyn Location) -> Value {
    Value::String(location.url())
}

fn post_date(location: &dyn Location) -> Value {
    optional(location.post_date())
}

fn current_date(location: &dyn Location) -> Value {
    Value::String(location.current_date())
}
