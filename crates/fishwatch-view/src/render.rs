//! HTML page rendering via `minijinja`.
//!
//! The page is one template, `index.html`. The built-in copy is compiled
//! in; `view.templates_dir` can point at a directory with a replacement.
//! Templates with an `.html` name are auto-escaped, so provider text that
//! survives tag stripping is still rendered inert.

use fishwatch_core::config::ViewConfig;
use minijinja::{Environment, context};
use reqwest::Url;

use crate::error::ViewError;
use crate::selector::{DisplayState, IDLE_MESSAGE, SelectorView};

/// Name the page template is registered under.
const PAGE_TEMPLATE: &str = "index.html";

/// Built-in page template.
const BUILTIN_PAGE: &str = include_str!("../templates/index.html");

/// Decides which image URLs may be rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagePolicy {
    hosts: Vec<String>,
}

impl ImagePolicy {
    /// Allow images from `hosts` only. An empty list allows any host.
    pub fn new(hosts: &[String]) -> Self {
        Self {
            hosts: hosts.iter().map(|h| h.to_ascii_lowercase()).collect(),
        }
    }

    /// Whether `url` is an `http(s)` URL on an allowed host.
    pub fn allows(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        if !matches!(parsed.scheme(), "http" | "https") {
            return false;
        }
        let Some(host) = parsed.host_str() else {
            return false;
        };
        self.hosts.is_empty() || self.hosts.iter().any(|allowed| allowed == host)
    }
}

/// Renders a [`SelectorView`] as a full HTML page.
pub struct PageRenderer {
    env: Environment<'static>,
    images: ImagePolicy,
}

impl PageRenderer {
    /// Create a renderer from view configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Template`] if a configured template directory
    /// has no readable `index.html`, or the template does not compile.
    pub fn new(config: &ViewConfig) -> Result<Self, ViewError> {
        let source = match &config.templates_dir {
            Some(dir) => load_template(dir, PAGE_TEMPLATE)?,
            None => BUILTIN_PAGE.to_owned(),
        };
        Self::from_source(source, ImagePolicy::new(&config.image_hosts))
    }

    /// Create a renderer from template source.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Template`] if the template does not compile.
    pub fn from_source(source: String, images: ImagePolicy) -> Result<Self, ViewError> {
        let mut env = Environment::new();
        env.add_template_owned(PAGE_TEMPLATE, source)
            .map_err(|e| ViewError::Template(format!("failed to add page template: {e}")))?;
        Ok(Self { env, images })
    }

    /// Render the page for the view's current state.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Template`] if rendering fails.
    pub fn render(&self, view: &SelectorView) -> Result<String, ViewError> {
        let display = view.display();
        let image = match display {
            DisplayState::Loaded(fish) => fish
                .image
                .as_deref()
                .filter(|url| self.images.allows(url)),
            _ => None,
        };

        let html = self
            .env
            .get_template(PAGE_TEMPLATE)
            .map_err(|e| ViewError::Template(format!("missing page template: {e}")))?
            .render(context! {
                options => view.options(),
                display => display,
                image => image,
                idle_message => IDLE_MESSAGE,
            })
            .map_err(|e| ViewError::Template(format!("page render failed: {e}")))?;
        Ok(html)
    }
}

/// Read a template file from disk.
fn load_template(dir: &str, filename: &str) -> Result<String, ViewError> {
    let path = format!("{dir}/{filename}");
    std::fs::read_to_string(&path)
        .map_err(|e| ViewError::Template(format!("failed to read {path}: {e}")))
}
