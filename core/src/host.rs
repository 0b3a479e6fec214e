/// Short sounds that acknowledge user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Select,
    Confirm,
    Denied,
    Open,
    Close,
}

impl Cue {
    pub const ALL: [Cue; 5] = [Cue::Select, Cue::Confirm, Cue::Denied, Cue::Open, Cue::Close];

    pub fn file_name(self) -> &'static str {
        match self {
            Cue::Select => "select.wav",
            Cue::Confirm => "confirm.wav",
            Cue::Denied => "denied.wav",
            Cue::Open => "open.wav",
            Cue::Close => "close.wav",
        }
    }
}

pub trait CuePlayer {
    fn play(&mut self, cue: Cue);
}

pub trait GameLauncher {
    /// Starts the game behind a menu item. Returns `true` once the external
    /// launcher is confirmed running.
    fn launch(&mut self, item: usize) -> bool;
}

impl CuePlayer for Vec<Cue> {
    fn play(&mut self, cue: Cue) {
        self.push(cue);
    }
}
