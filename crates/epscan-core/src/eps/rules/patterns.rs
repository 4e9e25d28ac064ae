//! Label grammars for EPS extraction.
//!
//! Each category is a case-insensitive regex. The `basic` grammar is split in
//! two because its leading ordering carries a "not preceded by non-GAAP"
//! condition that the `regex` crate cannot express as a lookbehind; the check
//! lives in [`super::labels`].

use lazy_static::lazy_static;
use regex::Regex;

/// Short qualifier after "attributable to" and friends: 5-50 characters that
/// do not cross a comma, period or semicolon.
const QUALIFIER: &str = r"[^,.;]{5,50}?";

lazy_static! {
    // "Basic [and diluted] [GAAP] Earnings [(loss)] per [common] share"
    pub static ref BASIC_LEADING: Regex = Regex::new(
        r"(?i)(\$(\d+\.\d+)\s+)?(Basic\s+(?:and diluted\s+)?(?:GAAP\s+)?(Earnings|Net\s+(?:\(loss\)\s+)?Income|Net\s+Earnings|Income)\s+(?:\(loss\)\s+)?per\s+(common|ordinary)?\s*share)"
    ).unwrap();

    // "Net income attributable to common stockholders per share: Basic"
    pub static ref BASIC_TRAILING: Regex = Regex::new(&format!(
        r"(?i)(Earnings|Net\s+Income|Net\s+Earnings|Income|Loss)\s+(\(loss\)\s+)?(attributable\s*to {q}|allocated\s*to {q}|available\s*to {q})?per\s+(common|ordinary)?\s*share\s*(attributable\s*to {q}|allocated\s*to {q})?\s*(:|-|—)?\s*Basic",
        q = QUALIFIER
    )).unwrap();

    // "Diluted earnings per share" or "Earnings per share ... Diluted"
    pub static ref DILUTED: Regex = Regex::new(
        r"(?i)(\$(\d+\.\d+)\s+)?(Diluted\s+(Earnings|Net\s+Income|Net\s+Earnings)\s+(?:\(loss\)\s+)?per\s+(?:common\s+)?share)|(Earnings|Net\s+Income|Net\s+Earnings)\s+(\(loss\)\s+)?per\s+(common\s+)?share.*?Diluted"
    ).unwrap();

    // "(Loss) earnings per share" or "[(net)] Loss per [common] share"
    pub static ref LOSS: Regex = Regex::new(
        r"(?i)(\$(\d+\.\d+)\s+)?(\((Loss)\)\s+earnings\s+per\s+share)|(\(net\)\s+)?Loss\s+per\s+(?:common\s+)?share"
    ).unwrap();

    // "Per share data: Net income - Basic"
    pub static ref PER_SHARE_FIRST: Regex = Regex::new(
        r"(?i)per\s+(?:common\s+)?share\s*(data:)?\s*(Earnings|Net\s+(?:\(loss\)\s+)?Income|Net\s+(?:\(loss\)\s+)?Earnings|Income)\s*(:|-|—)?\s*Basic"
    ).unwrap();

    // Figure after a label: optional accounting parentheses around d.dd, ASCII digits only
    pub static ref NUMERAL: Regex = Regex::new(
        r"(\()?([0-9]+\.[0-9]+)\s*(\))?"
    ).unwrap();
}
