/// The single attack charge.
///
/// Only this crate can mint one and it is not `Clone`, so a world's
/// [`attack`](crate::WorldMut::attack) can be called at most once per arrow.
#[derive(Debug, PartialEq, Eq)]
pub struct Arrow(());

#[derive(Debug, PartialEq, Eq)]
pub struct Quiver(Option<Arrow>);

impl Quiver {
    pub fn loaded() -> Self {
        Self(Some(Arrow(())))
    }

    pub fn empty() -> Self {
        Self(None)
    }

    pub fn has_arrow(&self) -> bool {
        self.0.is_some()
    }

    pub fn count(&self) -> u32 {
        u32::from(self.has_arrow())
    }

    pub fn take(&mut self) -> Option<Arrow> {
        self.0.take()
    }
}

impl Default for Quiver {
    fn default() -> Self {
        Self::loaded()
    }
}
