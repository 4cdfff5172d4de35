/// A canned prompt offered on the welcome screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub title: &'static str,
    pub prompt: &'static str,
}

pub const SUGGESTIONS: [Suggestion; 4] = [
    Suggestion {
        title: "Analyze latest earnings reports",
        prompt: "What are Apple's latest quarterly earnings?",
    },
    Suggestion {
        title: "Tech sector analysis",
        prompt: "What's the current state of the tech sector?",
    },
    Suggestion {
        title: "Market & inflation insights",
        prompt: "How are inflation rates affecting markets?",
    },
    Suggestion {
        title: "Today's top performers",
        prompt: "What are the best performing stocks today?",
    },
];
