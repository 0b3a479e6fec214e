//! The fixed set of launchable titles and the collections that ship them.

pub const ITEM_COUNT: usize = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collection {
    /// KINGDOM HEARTS HD 1.5+2.5 ReMIX
    Remix,
    /// KINGDOM HEARTS HD 2.8 Final Chapter Prologue
    FinalChapter,
    /// KINGDOM HEARTS III
    Kh3,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Remix, Collection::FinalChapter, Collection::Kh3];

    /// Key used in the persisted configuration.
    pub fn key(self) -> &'static str {
        match self {
            Collection::Remix => "KH1.5+2.5",
            Collection::FinalChapter => "KH2.8",
            Collection::Kh3 => "KH3",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Collection::Remix => "KINGDOM HEARTS HD 1.5+2.5 ReMIX",
            Collection::FinalChapter => "KINGDOM HEARTS HD 2.8 Final Chapter Prologue",
            Collection::Kh3 => "KINGDOM HEARTS III",
        }
    }

    /// Heroic's identifier for the collection, also the stem of its
    /// GamesConfig JSON file.
    pub fn config_id(self) -> &'static str {
        match self {
            Collection::Remix => "68c214c58f694ae88c2dab6f209b43e4",
            Collection::FinalChapter => "d1a8f7c478d4439b8c60a5808715dc05",
            Collection::Kh3 => "fd711544a06543e0ab1b0808de334120",
        }
    }

    /// Files that must exist below an install folder for it to be accepted.
    pub fn required_files(self) -> &'static [&'static str] {
        match self {
            Collection::Remix => &[
                "KINGDOM HEARTS Birth by Sleep FINAL MIX.exe",
                "KINGDOM HEARTS FINAL MIX.exe",
                "KINGDOM HEARTS Re_Chain of Memories.exe",
                "KINGDOM HEARTS II FINAL MIX.exe",
            ],
            Collection::FinalChapter => &[
                "KINGDOM HEARTS Dream Drop Distance.exe",
                "KINGDOM HEARTS 0.2 Birth by Sleep/Binaries/Win64/KINGDOM HEARTS 0.2 Birth by Sleep.exe",
            ],
            Collection::Kh3 => &["KINGDOM HEARTS III/Binaries/Win64/KINGDOM HEARTS III.exe"],
        }
    }

    /// Menu items gated by this collection.
    pub fn items(self) -> impl Iterator<Item = usize> {
        GAMES
            .iter()
            .enumerate()
            .filter(move |(_, game)| game.collection == self)
            .map(|(index, _)| index)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameInfo {
    pub name: &'static str,
    pub collection: Collection,
    /// Executable path relative to the collection's install folder.
    pub exe: &'static str,
    /// Command line flag that launches the game without showing the menu.
    pub flag: &'static str,
    /// Prefix of the game's title, logo and background artwork.
    pub asset_key: &'static str,
}

pub const GAMES: [GameInfo; ITEM_COUNT] = [
    GameInfo {
        name: "KINGDOM HEARTS FINAL MIX",
        collection: Collection::Remix,
        exe: "KINGDOM HEARTS FINAL MIX.exe",
        flag: "-kh1",
        asset_key: "kh1",
    },
    GameInfo {
        name: "KINGDOM HEARTS Re:Chain of Memories",
        collection: Collection::Remix,
        exe: "KINGDOM HEARTS Re_Chain of Memories.exe",
        flag: "-com",
        asset_key: "com",
    },
    GameInfo {
        name: "KINGDOM HEARTS II FINAL MIX",
        collection: Collection::Remix,
        exe: "KINGDOM HEARTS II FINAL MIX.exe",
        flag: "-kh2",
        asset_key: "kh2",
    },
    GameInfo {
        name: "KINGDOM HEARTS Birth by Sleep FINAL MIX",
        collection: Collection::Remix,
        exe: "KINGDOM HEARTS Birth by Sleep FINAL MIX.exe",
        flag: "-bbs",
        asset_key: "bbs",
    },
    GameInfo {
        name: "KINGDOM HEARTS Dream Drop Distance",
        collection: Collection::FinalChapter,
        exe: "KINGDOM HEARTS Dream Drop Distance.exe",
        flag: "-ddd",
        asset_key: "ddd",
    },
    GameInfo {
        name: "KINGDOM HEARTS 0.2 Birth by Sleep -A fragmentary passage-",
        collection: Collection::FinalChapter,
        exe: "KINGDOM HEARTS 0.2 Birth by Sleep/Binaries/Win64/KINGDOM HEARTS 0.2 Birth by Sleep.exe",
        flag: "-afp",
        asset_key: "afp",
    },
    GameInfo {
        name: "KINGDOM HEARTS III",
        collection: Collection::Kh3,
        exe: "KINGDOM HEARTS III/Binaries/Win64/KINGDOM HEARTS III.exe",
        flag: "-kh3",
        asset_key: "kh3",
    },
];

pub fn game(index: usize) -> Option<&'static GameInfo> {
    GAMES.get(index)
}

pub fn item_for_flag(flag: &str) -> Option<usize> {
    GAMES.iter().position(|game| game.flag == flag)
}
