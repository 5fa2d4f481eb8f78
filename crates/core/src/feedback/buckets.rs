//! Threshold tables for feedback generation.
//!
//! Each dimension's thresholds are ordered boundary data evaluated by one
//! lookup routine instead of branching cascades. A bucket's `lower` bound is
//! inclusive; boundary values belong to the higher bucket.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quality {
    /// Under the dimension's good range: suggestion territory.
    Below,
    /// In the good range: counted as a strength.
    Good,
    /// Past the good range: suggestion territory in the other direction.
    Above,
}

#[derive(Clone, Copy, Debug)]
pub struct Bucket {
    /// Inclusive lower bound.
    pub lower: f32,
    pub name: &'static str,
    pub quality: Quality,
    /// Sentence for the per-dimension feedback list.
    pub feedback: &'static str,
    /// Short clause for composed assessments.
    pub summary: &'static str,
    /// Improvement advice; empty for good buckets.
    pub suggestion: &'static str,
}

pub struct BucketTable {
    pub dimension: &'static str,
    /// Sentence credited when the value sits in the good range.
    pub strength: &'static str,
    /// Index of the first bucket counted as "high" when comparing against a
    /// benchmark.
    pub high_from: usize,
    pub buckets: &'static [Bucket],
}

impl BucketTable {
    pub fn index_for(&self, value: f32) -> usize {
        let mut index = 0;
        for (i, bucket) in self.buckets.iter().enumerate() {
            if value >= bucket.lower {
                index = i;
            } else {
                break;
            }
        }
        index
    }

    pub fn bucket_for(&self, value: f32) -> &Bucket {
        &self.buckets[self.index_for(value)]
    }

    pub fn is_good(&self, value: f32) -> bool {
        self.bucket_for(value).quality == Quality::Good
    }

    pub fn is_high(&self, value: f32) -> bool {
        self.index_for(value) >= self.high_from
    }
}

pub static PITCH: BucketTable = BucketTable {
    dimension: "pitch variation",
    strength: "Good pitch variation that keeps your speech engaging.",
    high_from: 2,
    buckets: &[
        Bucket {
            lower: 0.0,
            name: "low",
            quality: Quality::Below,
            feedback: "Your speech has limited pitch variation, which can sound monotonous. Try varying your tone more to stay engaging.",
            summary: "Your pitch stays in a narrow band.",
            suggestion: "Practice emphasizing key words by raising or lowering your pitch. Exaggerate at first, then settle into a natural level.",
        },
        Bucket {
            lower: 15.0,
            name: "medium",
            quality: Quality::Below,
            feedback: "Your pitch variation is decent, with room to stretch further for emphasis.",
            summary: "Your pitch varies a comfortable amount.",
            suggestion: "Stretch important words across a wider pitch range to add color to the delivery.",
        },
        Bucket {
            lower: 30.0,
            name: "high",
            quality: Quality::Good,
            feedback: "You're using strong pitch variation. Your voice sounds expressive and engaging.",
            summary: "Your pitch moves through an engaging range.",
            suggestion: "",
        },
        Bucket {
            lower: 40.0,
            name: "excellent",
            quality: Quality::Good,
            feedback: "Excellent pitch variation. Your intonation carries the message vividly.",
            summary: "Your intonation is vivid and wide-ranging.",
            suggestion: "",
        },
    ],
};

pub static ENERGY: BucketTable = BucketTable {
    dimension: "vocal energy",
    strength: "Effective use of emphasis through volume variation.",
    high_from: 2,
    buckets: &[
        Bucket {
            lower: 0.0,
            name: "low",
            quality: Quality::Below,
            feedback: "Try emphasizing important words by varying your volume more.",
            summary: "Your volume stays mostly level.",
            suggestion: "Record a passage while deliberately leaning into key words, aiming for clear loud-soft contrast.",
        },
        Bucket {
            lower: 0.03,
            name: "medium",
            quality: Quality::Below,
            feedback: "Your volume variation is building; push the contrast a little further on key words.",
            summary: "Your volume varies a modest amount.",
            suggestion: "Increase the volume contrast between emphasized and ordinary words.",
        },
        Bucket {
            lower: 0.06,
            name: "high",
            quality: Quality::Good,
            feedback: "Good job varying your volume for emphasis. Your speech feels dynamic.",
            summary: "Your volume rises and falls with the material.",
            suggestion: "",
        },
        Bucket {
            lower: 0.1,
            name: "excellent",
            quality: Quality::Good,
            feedback: "Excellent dynamic range. Emphasis lands exactly where it should.",
            summary: "Your dynamics are strong and deliberate.",
            suggestion: "",
        },
    ],
};

pub static RATE: BucketTable = BucketTable {
    dimension: "speaking pace",
    strength: "Well-balanced speaking pace that's easy to follow.",
    high_from: 4,
    buckets: &[
        Bucket {
            lower: 0.0,
            name: "too slow",
            quality: Quality::Below,
            feedback: "Your pace is quite slow, which can lose listeners between words.",
            summary: "Your pacing is very deliberate.",
            suggestion: "Practice with a metronome set slightly faster than your comfortable speaking rate.",
        },
        Bucket {
            lower: 2.0,
            name: "slow",
            quality: Quality::Below,
            feedback: "Your pace is a bit slow. Picking it up slightly will help engagement.",
            summary: "Your pacing runs slow.",
            suggestion: "Read a familiar passage at a slightly brisker clip than feels natural.",
        },
        Bucket {
            lower: 2.5,
            name: "measured",
            quality: Quality::Below,
            feedback: "Your pace is measured; a touch more momentum would add energy.",
            summary: "Your pacing is measured.",
            suggestion: "Let the pace build a little through the middle of your sentences.",
        },
        Bucket {
            lower: 3.0,
            name: "optimal",
            quality: Quality::Good,
            feedback: "Your speaking pace is good - not too fast or too slow.",
            summary: "Your pacing sits in a comfortable range.",
            suggestion: "",
        },
        Bucket {
            lower: 4.5,
            name: "fast",
            quality: Quality::Above,
            feedback: "You're speaking quickly. Slowing slightly would give listeners more room.",
            summary: "Your pacing pushes fast.",
            suggestion: "Mark deliberate pause points in your script and honor them.",
        },
        Bucket {
            lower: 5.0,
            name: "too fast",
            quality: Quality::Above,
            feedback: "You're speaking very quickly, which makes it hard to follow. Slow down and add pauses for emphasis.",
            summary: "Your pacing races.",
            suggestion: "Mark deliberate pause points in your script and practice honoring every one.",
        },
    ],
};

pub static PAUSE: BucketTable = BucketTable {
    dimension: "use of pauses",
    strength: "Effective use of pauses for emphasis.",
    high_from: 2,
    buckets: &[
        Bucket {
            lower: 0.0,
            name: "low",
            quality: Quality::Below,
            feedback: "Try adding more strategic pauses to give listeners time to absorb important points.",
            summary: "You rarely pause.",
            suggestion: "Insert a deliberate pause before each key point and after questions.",
        },
        Bucket {
            lower: 0.1,
            name: "medium",
            quality: Quality::Below,
            feedback: "You pause occasionally; a few more deliberate breaks would sharpen your points.",
            summary: "You pause now and then.",
            suggestion: "Choose two or three places per passage for a full beat of silence.",
        },
        Bucket {
            lower: 0.15,
            name: "high",
            quality: Quality::Good,
            feedback: "You're using pauses effectively. Good job!",
            summary: "Your pauses land where they help.",
            suggestion: "",
        },
        Bucket {
            lower: 0.25,
            name: "heavy",
            quality: Quality::Above,
            feedback: "You pause frequently. Some breaks are effective, but trim the hesitations.",
            summary: "Your delivery breaks often.",
            suggestion: "Rehearse transitions so breaks land where you intend them rather than where you hesitate.",
        },
        Bucket {
            lower: 0.35,
            name: "excessive",
            quality: Quality::Above,
            feedback: "Pauses dominate your speech and break the flow. Keep the thread moving.",
            summary: "Your delivery is mostly gaps.",
            suggestion: "Practice shorter gaps: one beat at commas, two beats at sentence ends.",
        },
    ],
};

pub static EMPHASIS: BucketTable = BucketTable {
    dimension: "emphasis",
    strength: "Clear emphasis that flags your key words.",
    high_from: 3,
    buckets: &[
        Bucket {
            lower: 0.0,
            name: "rare",
            quality: Quality::Below,
            feedback: "Emphasis rarely appears; key words blend into the rest of the sentence.",
            summary: "Little stands out.",
            suggestion: "Pick the single most important word in each sentence and lean into it.",
        },
        Bucket {
            lower: 0.03,
            name: "occasional",
            quality: Quality::Below,
            feedback: "You emphasize occasionally; a few more stressed words would guide listeners better.",
            summary: "Some words stand out.",
            suggestion: "Mark the words that carry your argument and give each a deliberate push.",
        },
        Bucket {
            lower: 0.08,
            name: "good",
            quality: Quality::Good,
            feedback: "You're highlighting key words well without overdoing it.",
            summary: "Key words stand out cleanly.",
            suggestion: "",
        },
        Bucket {
            lower: 0.2,
            name: "heavy",
            quality: Quality::Above,
            feedback: "Heavy emphasis throughout; when everything is stressed, nothing stands out.",
            summary: "Almost everything is stressed.",
            suggestion: "Reserve full stress for the words that truly carry the message.",
        },
    ],
};
