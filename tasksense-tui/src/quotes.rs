//! Motivational quotes for the dashboard header.

use rand::seq::SliceRandom;

/// A quote with attribution.
#[derive(Debug, PartialEq, Eq)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

const FALLBACK: Quote = Quote {
    text: "The secret of getting ahead is getting started.",
    author: "Mark Twain",
};

pub const QUOTES: &[Quote] = &[
    Quote {
        text: "The secret of getting ahead is getting started.",
        author: "Mark Twain",
    },
    Quote {
        text: "It always seems impossible until it's done.",
        author: "Nelson Mandela",
    },
    Quote {
        text: "Focus on being productive instead of busy.",
        author: "Tim Ferriss",
    },
    Quote {
        text: "You don't have to be great to start, but you have to start to be great.",
        author: "Zig Ziglar",
    },
    Quote {
        text: "The way to get started is to quit talking and begin doing.",
        author: "Walt Disney",
    },
    Quote {
        text: "Amateurs sit and wait for inspiration, the rest of us just get up and go to work.",
        author: "Stephen King",
    },
    Quote {
        text: "Done is better than perfect.",
        author: "Sheryl Sandberg",
    },
    Quote {
        text: "What you do today can improve all your tomorrows.",
        author: "Ralph Marston",
    },
    Quote {
        text: "Either you run the day or the day runs you.",
        author: "Jim Rohn",
    },
    Quote {
        text: "Small deeds done are better than great deeds planned.",
        author: "Peter Marshall",
    },
];

/// Picks a random quote. Each dashboard visit gets a fresh one.
pub fn pick() -> &'static Quote {
    let mut rng = rand::thread_rng();
    match QUOTES.choose(&mut rng) {
        Some(quote) => quote,
        None => &FALLBACK,
    }
}
