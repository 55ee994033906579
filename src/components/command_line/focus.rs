use std::rc::{Rc, Weak};

use crate::error::Result;

/// Something that can take input focus on behalf of the view.
pub trait FocusSurface {
    fn focus(&self) -> Result<()>;
}

/// Non-owning back-reference to the surface currently representing the
/// view's input target. The host attaches it when the surface is created
/// and clears it when the surface goes away.
#[derive(Default)]
pub struct SurfaceHandle {
    surface: Option<Weak<dyn FocusSurface>>,
}

impl SurfaceHandle {
    pub fn attach(&mut self, surface: &Rc<dyn FocusSurface>) {
        self.surface = Some(Rc::downgrade(surface));
    }

    pub fn clear(&mut self) {
        self.surface = None;
    }

    pub fn get(&self) -> Option<Rc<dyn FocusSurface>> {
        self.surface.as_ref().and_then(Weak::upgrade)
    }

    pub fn is_attached(&self) -> bool {
        self.get().is_some()
    }
}

impl std::fmt::Debug for SurfaceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceHandle")
            .field("attached", &self.is_attached())
            .finish()
    }
}
