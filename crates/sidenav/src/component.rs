//! Page-component seam.

use sidenav_render::RenderError;

use crate::builder::MenuBuilder;

/// A component that renders itself into a page fragment.
///
/// Page assembly code holds sidebars behind this trait so a host can swap the
/// stock [`MenuBuilder`] for its own markup source.
pub trait SidebarComponent {
    fn create_html(&self) -> Result<String, RenderError>;
}

impl SidebarComponent for MenuBuilder<'_> {
    fn create_html(&self) -> Result<String, RenderError> {
        self.render()
    }
}
