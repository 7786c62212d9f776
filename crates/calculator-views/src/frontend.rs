//! Page-level hooks shared by every calculator

use calculator_conf::Settings;
use std::fmt;
use std::path::{Path, PathBuf};

/// What the rendering layer needs besides the calculator state
pub trait Frontend: fmt::Debug {
	/// Analytics property id; empty when analytics is disabled
	fn google_analytics_id(&self) -> &str;

	/// Directory static files and templates are served from
	fn document_root(&self) -> &Path;

	/// Public URL of a static asset
	fn asset_url(&self, path: &str) -> String;
}

/// [`Frontend`] with fixed values
///
/// # Examples
///
/// ```
/// use calculator_views::frontend::{Frontend, StaticFrontend};
///
/// let frontend = StaticFrontend::new("UA-1", "/srv/calc", "https://cdn.example.com/assets/");
/// assert_eq!(frontend.asset_url("/css/main.css"), "https://cdn.example.com/assets/css/main.css");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFrontend {
	google_analytics_id: String,
	document_root: PathBuf,
	assets_url: String,
}

impl StaticFrontend {
	pub fn new(
		google_analytics_id: impl Into<String>,
		document_root: impl Into<PathBuf>,
		assets_url: impl Into<String>,
	) -> Self {
		Self {
			google_analytics_id: google_analytics_id.into(),
			document_root: document_root.into(),
			assets_url: assets_url.into(),
		}
	}

	pub fn from_settings(settings: &Settings) -> Self {
		Self::new(
			settings.google_analytics_id.clone(),
			settings.document_root.clone(),
			settings.assets_url.clone(),
		)
	}
}

impl Default for StaticFrontend {
	fn default() -> Self {
		Self::from_settings(&Settings::default())
	}
}

impl Frontend for StaticFrontend {
	fn google_analytics_id(&self) -> &str {
		&self.google_analytics_id
	}

	fn document_root(&self) -> &Path {
		&self.document_root
	}

	fn asset_url(&self, path: &str) -> String {
		format!(
			"{}/{}",
			self.assets_url.trim_end_matches('/'),
			path.trim_start_matches('/')
		)
	}
}
