// Render collaborator boundary.
// The engine never renders anything itself — it depends on a mounted,
// measurable tree and reads box metrics back from it. The browser DOM is
// one implementation; `HeadlessSurface` is the in-repo non-browser one.

pub mod headless;
pub mod surface;

pub use headless::{HeadlessSurface, HeightProfile, SectionProfile};
pub use surface::{MountedTree, NodeBox, RenderSurface};
