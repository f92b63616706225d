//! User-facing tour controls and their default key bindings.

/// Something the user asked the tour to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourCommand {
    /// Go to a specific camera.
    NavigateTo(usize),
    /// Go to the camera before the current one.
    Previous,
    /// Go to the camera after the current one.
    Next,
    /// Go to the first camera.
    First,
    /// Go to the last camera.
    Last,
    /// Show or hide the point cloud.
    TogglePointCloud,
}

/// Keys the tour reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home.
    Home,
    /// End.
    End,
    /// The `P` key.
    P,
}

impl Key {
    /// Parses a DOM-style key name (`"ArrowLeft"`, `"Home"`, `"p"`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "Left" => Some(Key::Left),
            "ArrowRight" | "Right" => Some(Key::Right),
            "Home" => Some(Key::Home),
            "End" => Some(Key::End),
            "p" | "P" | "KeyP" => Some(Key::P),
            _ => None,
        }
    }

    /// Returns display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Key::Left => "Left",
            Key::Right => "Right",
            Key::Home => "Home",
            Key::End => "End",
            Key::P => "P",
        }
    }

    /// Command bound to this key.
    #[must_use]
    pub fn command(self) -> TourCommand {
        match self {
            Key::Left => TourCommand::Previous,
            Key::Right => TourCommand::Next,
            Key::Home => TourCommand::First,
            Key::End => TourCommand::Last,
            Key::P => TourCommand::TogglePointCloud,
        }
    }
}
