// src/generators/trigram.rs
use lazy_static::lazy_static;

// Corpus the trigram statistics are counted from. Common English words,
// lowercase letters only; anything else in a word would be skipped by the
// windowing below.
const CORPUS: &[&str] = &[
    "about", "above", "across", "action", "address", "advance", "advice", "after", "again",
    "against", "almost", "alone", "along", "already", "always", "amount", "animal", "another",
    "answer", "anything", "appear", "apple", "around", "arrive", "article", "attention",
    "autumn", "balance", "banana", "basket", "battle", "beach", "beautiful", "because",
    "become", "before", "begin", "behind", "believe", "belong", "beside", "better", "between",
    "beyond", "bottle", "bottom", "branch", "bread", "breakfast", "bridge", "bright", "bring",
    "brother", "brown", "build", "business", "butter", "camera", "candle", "capital",
    "captain", "carry", "castle", "catch", "cattle", "center", "certain", "chance", "change",
    "chapter", "character", "charge", "chicken", "children", "choose", "circle", "claim",
    "class", "clean", "clear", "climb", "close", "cloud", "coast", "coffee", "collect",
    "college", "color", "common", "company", "complete", "concern", "condition", "consider",
    "contain", "continue", "control", "corner", "correct", "cotton", "count", "country",
    "course", "cover", "create", "crowd", "culture", "current", "damage", "dance", "danger",
    "daughter", "decide", "decision", "degree", "deliver", "demand", "describe", "desert",
    "design", "desire", "detail", "develop", "device", "dinner", "direct", "discover",
    "distance", "divide", "doctor", "dollar", "double", "dragon", "dream", "dress", "drink",
    "drive", "during", "eagle", "early", "earth", "easy", "eight", "either", "electric",
    "element", "eleven", "empty", "energy", "engine", "enjoy", "enough", "enter", "entire",
    "escape", "evening", "event", "every", "exact", "example", "except", "exchange",
    "exercise", "expect", "experience", "explain", "express", "fabric", "factor", "family",
    "famous", "farmer", "father", "favor", "feather", "feature", "fellow", "fence", "field",
    "fifteen", "fight", "figure", "final", "finger", "finish", "first", "floor", "flower",
    "follow", "forest", "forget", "fortune", "forward", "found", "fresh", "friend", "front",
    "fruit", "further", "future", "garden", "gather", "general", "gentle", "glass", "golden",
    "grand", "grass", "great", "green", "ground", "group", "grow", "guard", "guess", "guest",
    "guide", "guitar", "habit", "handle", "happen", "happy", "harbor", "heart", "heavy",
    "height", "hello", "hidden", "history", "hollow", "honest", "honey", "horse", "hotel",
    "house", "hundred", "hunger", "hurry", "idea", "imagine", "important", "improve",
    "include", "increase", "indeed", "inside", "instead", "interest", "invite", "island",
    "jacket", "journey", "jungle", "kitchen", "knowledge", "ladder", "language", "large",
    "later", "laugh", "leader", "learn", "leather", "leave", "lemon", "length", "letter",
    "level", "light", "listen", "little", "local", "lonely", "longer", "machine", "magic",
    "manage", "manner", "marble", "market", "master", "matter", "meadow", "measure",
    "medical", "meeting", "melon", "member", "memory", "mention", "metal", "method",
    "middle", "might", "million", "minute", "mirror", "moment", "money", "monkey", "month",
    "morning", "mother", "motion", "mountain", "mouth", "movie", "music", "narrow", "nation",
    "nature", "nearly", "needle", "neighbor", "neither", "never", "night", "noise", "north",
    "nothing", "notice", "number", "object", "ocean", "offer", "office", "often", "orange",
    "order", "other", "outside", "paint", "palace", "paper", "pardon", "parent", "partner",
    "pasture", "pattern", "peace", "pencil", "people", "pepper", "perfect", "perhaps",
    "period", "person", "piano", "picture", "piece", "pilot", "place", "plain", "planet",
    "plant", "plate", "pleasure", "plenty", "pocket", "point", "police", "popular",
    "position", "possible", "powder", "power", "practice", "prepare", "present", "pretty",
    "price", "prince", "print", "prison", "private", "problem", "process", "produce",
    "promise", "proper", "protect", "proud", "provide", "public", "purple", "purpose",
    "quarter", "question", "quick", "quiet", "rabbit", "radio", "raise", "rather", "reach",
    "ready", "reason", "receive", "record", "region", "remain", "remember", "remove",
    "repeat", "reply", "report", "require", "rescue", "respect", "result", "return",
    "reward", "rhythm", "ribbon", "river", "rocket", "round", "royal", "rubber", "saddle",
    "sailor", "salad", "sample", "scale", "scene", "school", "science", "season", "second",
    "secret", "section", "sentence", "serious", "service", "settle", "seven", "shadow",
    "share", "sharp", "shelter", "shine", "short", "should", "shoulder", "shower", "signal",
    "silence", "silver", "simple", "since", "single", "sister", "sleep", "slight", "small",
    "smile", "smooth", "soldier", "solid", "sound", "south", "space", "speak", "special",
    "spend", "spirit", "spite", "sport", "spread", "spring", "square", "stand", "start",
    "state", "station", "steady", "still", "stomach", "stone", "store", "storm", "story",
    "straight", "strange", "stream", "street", "strength", "stretch", "strike", "strong",
    "student", "study", "subject", "sudden", "sugar", "summer", "supply", "support",
    "suppose", "surface", "surprise", "sweet", "system", "table", "taste", "teach",
    "temper", "tender", "thank", "theater", "there", "thing", "think", "third", "thirty",
    "those", "though", "thought", "thousand", "three", "through", "thunder", "ticket",
    "tiger", "timber", "together", "tomorrow", "tonight", "total", "touch", "toward",
    "tower", "trade", "train", "travel", "treasure", "tremble", "trouble", "truck", "trust",
    "turtle", "twelve", "twenty", "under", "understand", "until", "upper", "usual",
    "valley", "value", "velvet", "venture", "very", "victory", "village", "visit", "voice",
    "wagon", "wander", "watch", "water", "weather", "welcome", "whale", "wheat", "wheel",
    "where", "which", "while", "whisper", "white", "whole", "widow", "window", "winter",
    "wisdom", "within", "without", "woman", "wonder", "world", "would", "write", "yellow",
    "young",
];

const ALPHABET: usize = 26;

/// 26x26x26 letter trigram frequencies with their grand total (`sigma`),
/// driving the pronounceable random walk.
pub struct TrigramTable {
    counts: Vec<u32>,
    sigma: usize,
}

impl TrigramTable {
    fn build(words: &[&str]) -> Self {
        let mut counts = vec![0u32; ALPHABET * ALPHABET * ALPHABET];
        for word in words {
            let letters: Vec<usize> = word
                .bytes()
                .filter(|b| b.is_ascii_lowercase())
                .map(|b| (b - b'a') as usize)
                .collect();
            for window in letters.windows(3) {
                counts[Self::index(window[0], window[1], window[2])] += 1;
            }
        }
        let sigma = counts.iter().map(|&c| c as usize).sum();
        TrigramTable { counts, sigma }
    }

    fn index(a: usize, b: usize, c: usize) -> usize {
        (a * ALPHABET + b) * ALPHABET + c
    }

    /// Sum of all trigram frequencies.
    pub fn sigma(&self) -> usize {
        self.sigma
    }

    /// Select the first three letters: `r` is a uniform value in
    /// `[0, sigma)`; scanning cumulative sums, the first trigram whose
    /// running total exceeds `r` wins, weighting by joint frequency.
    pub fn pick_first(&self, r: usize) -> (usize, usize, usize) {
        let mut cumulative = 0usize;
        for (i, &count) in self.counts.iter().enumerate() {
            cumulative += count as usize;
            if cumulative > r {
                let c = i % ALPHABET;
                let b = (i / ALPHABET) % ALPHABET;
                let a = i / (ALPHABET * ALPHABET);
                return (a, b, c);
            }
        }
        // r >= sigma is a caller bug; fall back to the last non-zero entry.
        let i = self
            .counts
            .iter()
            .rposition(|&c| c > 0)
            .unwrap_or(0);
        let c = i % ALPHABET;
        let b = (i / ALPHABET) % ALPHABET;
        (i / (ALPHABET * ALPHABET), b, c)
    }

    /// Total frequency of all third letters following the bigram `(a, b)`.
    /// Zero means no continuation exists in the table.
    pub fn continuation_total(&self, a: usize, b: usize) -> usize {
        (0..ALPHABET)
            .map(|c| self.counts[Self::index(a, b, c)] as usize)
            .sum()
    }

    /// Select the next letter after bigram `(a, b)`; `r` must be in
    /// `[0, continuation_total(a, b))`.
    pub fn pick_continuation(&self, a: usize, b: usize, r: usize) -> usize {
        let mut cumulative = 0usize;
        for c in 0..ALPHABET {
            cumulative += self.counts[Self::index(a, b, c)] as usize;
            if cumulative > r {
                return c;
            }
        }
        ALPHABET - 1
    }
}

lazy_static! {
    static ref TABLE: TrigramTable = TrigramTable::build(CORPUS);
}

pub fn table() -> &'static TrigramTable {
    &TABLE
}

/// Fixed leet substitutes per lowercase letter: `(digit, symbol)`. Every
/// symbol here appears in `pool::PRONOUNCEABLE_SYMBOLS`.
pub fn leet_substitutes(c: char) -> (Option<char>, Option<char>) {
    match c {
        'a' => (Some('4'), Some('@')),
        'b' => (Some('8'), None),
        'c' => (None, Some('(')),
        'e' => (Some('3'), None),
        'g' => (Some('9'), Some('&')),
        'h' => (None, Some('#')),
        'i' => (Some('1'), Some('!')),
        'l' => (Some('1'), Some('|')),
        'o' => (Some('0'), None),
        's' => (Some('5'), Some('$')),
        't' => (Some('7'), Some('+')),
        'z' => (Some('2'), None),
        _ => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_populated() {
        let t = table();
        assert!(t.sigma() > 1000, "corpus should yield a dense table");
    }

    #[test]
    fn pick_first_covers_whole_range() {
        let t = table();
        // The extreme draws must both resolve to valid letters.
        for r in [0, t.sigma() - 1] {
            let (a, b, c) = t.pick_first(r);
            assert!(a < 26 && b < 26 && c < 26);
            assert!(t.counts[TrigramTable::index(a, b, c)] > 0);
        }
    }

    #[test]
    fn continuation_matches_counts() {
        let t = table();
        // "th" is all over the corpus; it must continue.
        let (a, b) = (19, 7);
        let total = t.continuation_total(a, b);
        assert!(total > 0);
        for r in [0, total / 2, total - 1] {
            let c = t.pick_continuation(a, b, r);
            assert!(t.counts[TrigramTable::index(a, b, c)] > 0);
        }
    }

    #[test]
    fn leet_symbols_stay_in_pronounceable_set() {
        for c in 'a'..='z' {
            let (digit, symbol) = leet_substitutes(c);
            if let Some(d) = digit {
                assert!(d.is_ascii_digit());
            }
            if let Some(s) = symbol {
                assert!(crate::generators::pool::PRONOUNCEABLE_SYMBOLS.contains(s));
            }
        }
    }
}
