//! Event catalog.
//!
//! One marker type per event name used by the client widgets. Payload structs
//! mirror the JSON the socket delivers (camelCase on the wire).
//!
//! Events whose payload is still `serde_json::Value` carry data the widgets
//! never gave a fixed shape to. They are kept untyped until their producers
//! settle on one.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::handler::Event;

macro_rules! declare_events {
    ($( $(#[$meta:meta])* $ty:ident = $name:literal => $args:ty; )+) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            pub struct $ty;

            impl Event for $ty {
                const NAME: &'static str = $name;
                type Args = $args;
            }
        )+

        /// Every event name declared in the catalog
        pub const EVENT_NAMES: &[&str] = &[$($name),+];
    };
}

/// Player colour in finished-game notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    /// White
    #[serde(rename = "w")]
    White,
    /// Black
    #[serde(rename = "b")]
    Black,
}

/// Kind of report sent to the anti-bot endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbReport {
    /// Keyboard-controlled moves
    Kbc,
}

/// Chat permissions granted to the current user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPermissions {
    pub local: bool,
}

/// A stream announced in the crowd list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamInfo {
    pub name: String,
    pub lang: String,
}

/// Spectator crowd update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crowd {
    /// Number of connected spectators
    pub nb: u32,
    #[serde(default)]
    pub users: Option<Vec<String>>,
    #[serde(default)]
    pub anons: Option<u32>,
    /// Watcher widget data, rendered as-is
    #[serde(default)]
    pub watchers: Option<Value>,
    /// `(user id, stream)` pairs
    #[serde(default)]
    pub streams: Option<Vec<(String, StreamInfo)>>,
}

/// Site-wide announcement; both fields absent clears it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Position update for a game shown in a mini-board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FenUpdate {
    pub id: String,
    pub fen: String,
    /// Last move in UCI notation
    pub lm: String,
    /// White clock, seconds
    #[serde(default)]
    pub wc: Option<i64>,
    /// Black clock, seconds
    #[serde(default)]
    pub bc: Option<i64>,
}

/// A mini-board game finished
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameFinish {
    pub id: String,
    #[serde(default)]
    pub win: Option<Color>,
}

/// A followed player came online
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowingEnters {
    pub playing: bool,
    #[serde(default)]
    pub patron_color: Option<u8>,
}

/// Followed players currently online
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowingOnlines {
    pub playing: Vec<String>,
    pub patron_colors: Vec<u8>,
}

/// New private message notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageNew {
    pub text: String,
    pub user: String,
    /// Epoch milliseconds
    pub date: i64,
}

/// Notification inbox update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notifications {
    /// Paginated notification list, rendered as-is
    pub notifications: Value,
    pub unread: u32,
}

/// Upcoming tournament reminder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentReminder {
    pub id: String,
    pub name: String,
}

declare_events! {
    AbRep = "ab.rep" => AbReport;
    AnalysisCloseAll = "analysis.closeAll" => ();
    /// `(fen, path)`
    AnalysisChange = "analysis.change" => (String, String);
    AnalysisChartClick = "analysis.chart.click" => usize;
    AnalysisCompToggle = "analysis.comp.toggle" => bool;
    AnalysisServerProgress = "analysis.server.progress" => Value;
    /// `true` when switching to the 3D board
    BoardChange = "board.change" => bool;
    ChallengeAppOpen = "challenge-app.open" => ();
    ChartPanning = "chart.panning" => ();
    ChatPermissionsChanged = "chat.permissions" => ChatPermissions;
    ChatWriteable = "chat.writeable" => bool;
    /// Selector of the element whose content was loaded, if any
    ContentLoaded = "content-loaded" => Option<String>;
    Flip = "flip" => bool;
    Jump = "jump" => String;
    /// `(key, old key)`
    BotdevImportBook = "botdev.import.book" => (String, Option<String>);
    NotifyAppSetRead = "notify-app.set-read" => String;
    VoiceChatToggle = "voiceChat.toggle" => bool;
    /// `(ply, is mainline)`
    Ply = "ply" => (u32, Option<bool>);
    PlyTrigger = "ply.trigger" => ();
    RoundSuggestion = "round.suggestion" => Option<String>;
    SocketClose = "socket.close" => ();
    SocketInBlockedBy = "socket.in.blockedBy" => String;
    SocketInChallenges = "socket.in.challenges" => Value;
    SocketInChatReinstate = "socket.in.chat_reinstate" => String;
    SocketInChatTimeout = "socket.in.chat_timeout" => String;
    SocketInCrowd = "socket.in.crowd" => Crowd;
    SocketInAnnounce = "socket.in.announce" => Announcement;
    SocketInEndData = "socket.in.endData" => Value;
    SocketInFen = "socket.in.fen" => FenUpdate;
    SocketInFinish = "socket.in.finish" => GameFinish;
    /// `(title name, status)`
    SocketInFollowingEnters = "socket.in.following_enters" => (String, FollowingEnters);
    SocketInFollowingLeaves = "socket.in.following_leaves" => String;
    /// `(friends, status)`
    SocketInFollowingOnlines = "socket.in.following_onlines" => (Vec<String>, FollowingOnlines);
    SocketInFollowingPlaying = "socket.in.following_playing" => String;
    SocketInFollowingStoppedPlaying = "socket.in.following_stopped_playing" => String;
    /// Chat line, rendered by the chat widget
    SocketInMessage = "socket.in.message" => Value;
    /// Server latency, milliseconds
    SocketInMlat = "socket.in.mlat" => f64;
    SocketInMsgNew = "socket.in.msgNew" => MessageNew;
    SocketInMsgType = "socket.in.msgType" => String;
    SocketInNotifications = "socket.in.notifications" => Notifications;
    SocketInVoiceChat = "socket.in.voiceChat" => Vec<String>;
    SocketInVoiceChatOff = "socket.in.voiceChatOff" => ();
    SocketInVoiceChatPing = "socket.in.voiceChatPing" => ();
    SocketInRedirect = "socket.in.redirect" => Value;
    SocketInReload = "socket.in.reload" => Value;
    SocketInSk1 = "socket.in.sk1" => String;
    SocketInTournamentReminder = "socket.in.tournamentReminder" => TournamentReminder;
    SocketInUnblockedBy = "socket.in.unblockedBy" => String;
    SocketInServerRestart = "socket.in.serverRestart" => ();
    /// Round-trip lag, milliseconds
    SocketLag = "socket.lag" => f64;
    SocketOpen = "socket.open" => ();
    /// `(message type, data, options)`
    SocketSend = "socket.send" => (String, Option<Value>, Option<Value>);
    SpeechEnabled = "speech.enabled" => bool;
    StudySearchOpen = "study.search.open" => ();
    Theme = "theme" => String;
    TopToggleUserTag = "top.toggle.user_tag" => ();
    Zen = "zen" => ();
}
