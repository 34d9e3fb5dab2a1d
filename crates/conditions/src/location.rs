//! Request signals the host supplies to the evaluator.
use chrono::Utc;
use serde::Deserialize;

/// Device class of the current visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Tablet => "tablet",
            Self::Mobile => "mobile",
        }
    }

    /// Rough classification from a `User-Agent` header.
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        if ["ipad", "tablet", "kindle", "silk", "playbook"]
            .iter()
            .any(|marker| ua.contains(marker))
            || (ua.contains("android") && !ua.contains("mobile"))
        {
            Self::Tablet
        } else if ["mobile", "iphone", "ipod", "android", "blackberry", "opera mini", "iemobile"]
            .iter()
            .any(|marker| ua.contains(marker))
        {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }
}

/// Accessors for the current request, implemented by the host.
///
/// Every method is called lazily, only when a condition asks for it.
pub trait Location {
    /// Tags such as `front_page`, `singular`, `archive`, `search`, `404`.
    fn page_types(&self) -> Vec<String>;
    fn post_type(&self) -> Option<String>;
    fn post_id(&self) -> Option<i64>;
    /// Terms of the current post as `taxonomy:slug`.
    fn terms(&self) -> Vec<String>;
    fn page_template(&self) -> Option<String>;
    /// Roles of the logged-in user; empty for visitors.
    fn user_roles(&self) -> Vec<String>;
    fn is_logged_in(&self) -> bool {
        !self.user_roles().is_empty()
    }
    fn device_type(&self) -> DeviceType;
    fn url(&self) -> String;
    /// Publish date of the current post, `YYYY-MM-DD HH:MM:SS`.
    fn post_date(&self) -> Option<String>;
    fn current_date(&self) -> String {
        Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// A snapshot of request signals, for hosts that collect them up front.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestLocation {
    pub page_types: Vec<String>,
    pub post_type: Option<String>,
    pub post_id: Option<i64>,
    pub terms: Vec<String>,
    pub page_template: Option<String>,
    pub user_roles: Vec<String>,
    pub logged_in: Option<bool>,
    pub device: Option<DeviceType>,
    pub user_agent: Option<String>,
    pub url: String,
    pub post_date: Option<String>,
    pub now: Option<String>,
}

impl Location for RequestLocation {
    fn page_types(&self) -> Vec<String> {
        self.page_types.clone()
    }

    fn post_type(&self) -> Option<String> {
        self.post_type.clone()
    }

    fn post_id(&self) -> Option<i64> {
        self.post_id
    }

    fn terms(&self) -> Vec<String> {
        self.terms.clone()
    }

    fn page_template(&self) -> Option<String> {
        self.page_template.clone()
    }

    fn user_roles(&self) -> Vec<String> {
        self.user_roles.clone()
    }

    fn is_logged_in(&self) -> bool {
        self.logged_in.unwrap_or(!self.user_roles.is_empty())
    }

    fn device_type(&self) -> DeviceType {
        match (self.device, &self.user_agent) {
            (Some(device), _) => device,
            (None, Some(ua)) => DeviceType::from_user_agent(ua),
            (None, None) => DeviceType::Desktop,
        }
    }

    fn url(&self) -> String {
        self.url.clone()
    }

    fn post_date(&self) -> Option<String> {
        self.post_date.clone()
    }

    fn current_date(&self) -> String {
        match &self.now {
            Some(now) => now.clone(),
            None => Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
