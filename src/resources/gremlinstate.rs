//! Gremlin states and walk directions.
//!
//! At any instant the gremlin is in exactly one [`GremlinState`]. The
//! [`Direction`] only matters while walking; every other state is keyed with
//! [`Direction::None`] in the [`ResourceRegistry`](crate::resources::registry::ResourceRegistry).

/// Mutually exclusive gremlin modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GremlinState {
    Idle,
    Hover,
    Sleep,
    Intro,
    Outro,
    Grab,
    Walk,
    WalkIdle,
    Poke,
    Pat,
    LeftAction,
    RightAction,
    Reload,
    Emote,
}

impl GremlinState {
    pub const ALL: [GremlinState; 14] = [
        GremlinState::Idle,
        GremlinState::Hover,
        GremlinState::Sleep,
        GremlinState::Intro,
        GremlinState::Outro,
        GremlinState::Grab,
        GremlinState::Walk,
        GremlinState::WalkIdle,
        GremlinState::Poke,
        GremlinState::Pat,
        GremlinState::LeftAction,
        GremlinState::RightAction,
        GremlinState::Reload,
        GremlinState::Emote,
    ];

    /// Key used for this state in the character's JSON files.
    pub fn key(self) -> &'static str {
        match self {
            GremlinState::Idle => "Idle",
            GremlinState::Hover => "Hover",
            GremlinState::Sleep => "Sleep",
            GremlinState::Intro => "Intro",
            GremlinState::Outro => "Outro",
            GremlinState::Grab => "Grab",
            GremlinState::Walk => "Walk",
            GremlinState::WalkIdle => "WalkIdle",
            GremlinState::Poke => "Poke",
            GremlinState::Pat => "Pat",
            GremlinState::LeftAction => "LeftAction",
            GremlinState::RightAction => "RightAction",
            GremlinState::Reload => "Reload",
            GremlinState::Emote => "Emote",
        }
    }

    /// Animations that finish when their last frame has been shown.
    pub fn ends_by_frame(self) -> bool {
        matches!(
            self,
            GremlinState::Intro
                | GremlinState::LeftAction
                | GremlinState::RightAction
                | GremlinState::Pat
                | GremlinState::Poke
                | GremlinState::Reload
                | GremlinState::Outro
        )
    }

    /// Animations that loop until a timer moves the gremlin elsewhere.
    pub fn ends_by_timeout(self) -> bool {
        matches!(self, GremlinState::WalkIdle | GremlinState::Emote)
    }

    /// Passive states from which clicks, emotes and walking may start.
    pub fn is_idle_family(self) -> bool {
        matches!(
            self,
            GremlinState::WalkIdle | GremlinState::Idle | GremlinState::Hover | GremlinState::Sleep
        )
    }

    /// States from which a walk key starts (or redirects) walking.
    pub fn can_walk_from(self) -> bool {
        self.is_idle_family() || self == GremlinState::Walk
    }

    /// The two shooting actions.
    pub fn is_action(self) -> bool {
        matches!(self, GremlinState::LeftAction | GremlinState::RightAction)
    }
}

/// Walking direction. `None` is used by every non-walking animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// The eight compass directions that have their own walk animation.
    pub const WALKING: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// Key used for this direction's walk sheet in the character's JSON files.
    pub fn key(self) -> &'static str {
        match self {
            Direction::None => "None",
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
            Direction::UpLeft => "UpLeft",
            Direction::UpRight => "UpRight",
            Direction::DownLeft => "DownLeft",
            Direction::DownRight => "DownRight",
        }
    }

    /// Map a signed (vertical, horizontal) pair onto a direction.
    ///
    /// `-1` is up/left, `+1` is down/right, `0` is no movement on that axis.
    /// Any other magnitude is clamped to its sign.
    pub fn from_axes(vertical: i32, horizontal: i32) -> Direction {
        match (vertical.signum(), horizontal.signum()) {
            (0, 0) => Direction::None,
            (-1, 0) => Direction::Up,
            (1, 0) => Direction::Down,
            (0, -1) => Direction::Left,
            (0, 1) => Direction::Right,
            (-1, -1) => Direction::UpLeft,
            (-1, 1) => Direction::UpRight,
            (1, -1) => Direction::DownLeft,
            _ => Direction::DownRight,
        }
    }
}
