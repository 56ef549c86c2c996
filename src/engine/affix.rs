use regex::Regex;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AffixError {
    #[error("line {line}: malformed {directive} entry")]
    Malformed { line: usize, directive: String },

    #[error("line {line}: invalid affix condition '{condition}'")]
    Condition {
        line: usize,
        condition: String,
        #[source]
        source: regex::Error,
    },
}

/// How flag strings in the word list and affix file are encoded (`FLAG` directive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagMode {
    #[default]
    Char,
    Long,
    Num,
}

impl FlagMode {
    /// Split a raw flag string (the part after `/` in a word list entry) into flags
    pub fn split(self, flags: &str) -> Vec<String> {
        match self {
            FlagMode::Char => flags.chars().map(String::from).collect(),
            FlagMode::Long => {
                let chars: Vec<char> = flags.chars().collect();
                chars.chunks(2).map(|pair| pair.iter().collect()).collect()
            }
            FlagMode::Num => flags
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(String::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffixKind {
    Prefix,
    Suffix,
}

#[derive(Debug)]
pub struct AffixRule {
    pub strip: String,
    pub add: String,
    condition: Option<Regex>,
}

impl AffixRule {
    /// Apply the rule to `stem`, returning the derived form when the strip
    /// string and condition both match.
    pub fn apply(&self, kind: AffixKind, stem: &str) -> Option<String> {
        if let Some(condition) = &self.condition {
            if !condition.is_match(stem) {
                return None;
            }
        }

        let derived = match kind {
            AffixKind::Suffix => {
                let base = stem.strip_suffix(self.strip.as_str())?;
                format!("{}{}", base, self.add)
            }
            AffixKind::Prefix => {
                let base = stem.strip_prefix(self.strip.as_str())?;
                format!("{}{}", self.add, base)
            }
        };

        if derived.is_empty() {
            None
        } else {
            Some(derived)
        }
    }
}

#[derive(Debug)]
pub struct AffixGroup {
    pub kind: AffixKind,
    pub cross_product: bool,
    pub rules: Vec<AffixRule>,
}

/// The subset of a Hunspell `.aff` file the built-in engine understands
#[derive(Debug, Default)]
pub struct AffixFile {
    pub flag_mode: FlagMode,
    pub try_chars: String,
    pub replacements: Vec<(String, String)>,
    pub keep_case: Option<String>,
    pub no_suggest: Option<String>,
    pub groups: HashMap<String, AffixGroup>,
}

impl AffixFile {
    pub fn parse(content: &str) -> Result<Self, AffixError> {
        let mut affix = AffixFile::default();

        for (idx, raw) in content.lines().enumerate() {
            let line = idx + 1;
            let fields: Vec<&str> = raw.split_whitespace().collect();

            let Some(&directive) = fields.first() else {
                continue;
            };
            if directive.starts_with('#') {
                continue;
            }

            match directive {
                "FLAG" => {
                    affix.flag_mode = match fields.get(1).copied() {
                        Some("long") => FlagMode::Long,
                        Some("num") => FlagMode::Num,
                        _ => FlagMode::Char,
                    }
                }
                "TRY" => {
                    if let Some(chars) = fields.get(1) {
                        affix.try_chars = chars.to_string();
                    }
                }
                // The header line is `REP <count>`; entries carry two fields.
                "REP" if fields.len() >= 3 => {
                    affix
                        .replacements
                        .push((fields[1].replace('_', " "), fields[2].replace('_', " ")));
                }
                "KEEPCASE" => affix.keep_case = fields.get(1).map(|s| s.to_string()),
                "NOSUGGEST" => affix.no_suggest = fields.get(1).map(|s| s.to_string()),
                "PFX" | "SFX" => {
                    let kind = if directive == "PFX" {
                        AffixKind::Prefix
                    } else {
                        AffixKind::Suffix
                    };
                    affix.parse_affix_line(kind, directive, &fields, line)?;
                }
                _ => {}
            }
        }

        Ok(affix)
    }

    fn parse_affix_line(
        &mut self,
        kind: AffixKind,
        directive: &str,
        fields: &[&str],
        line: usize,
    ) -> Result<(), AffixError> {
        let malformed = || AffixError::Malformed {
            line,
            directive: directive.to_string(),
        };

        if fields.len() < 4 {
            return Err(malformed());
        }
        let flag = fields[1].to_string();

        let Some(group) = self.groups.get_mut(&flag) else {
            // First line for a flag is the group header: `SFX D Y 4`
            self.groups.insert(
                flag,
                AffixGroup {
                    kind,
                    cross_product: fields[2] == "Y",
                    rules: Vec::new(),
                },
            );
            return Ok(());
        };

        if group.kind != kind {
            return Err(malformed());
        }

        let strip = match fields[2] {
            "0" => String::new(),
            s => s.to_string(),
        };
        // Continuation classes (`ed/XY`) are not supported; keep the affix text only.
        let add = match fields[3].split('/').next().unwrap_or("") {
            "0" => String::new(),
            s => s.to_string(),
        };
        let condition = match fields.get(4).copied() {
            None | Some(".") => None,
            Some(cond) => {
                let pattern = match kind {
                    AffixKind::Prefix => format!("^{}", cond),
                    AffixKind::Suffix => format!("{}$", cond),
                };
                let regex = Regex::new(&pattern).map_err(|source| AffixError::Condition {
                    line,
                    condition: cond.to_string(),
                    source,
                })?;
                Some(regex)
            }
        };

        group.rules.push(AffixRule {
            strip,
            add,
            condition,
        });
        Ok(())
    }

    pub fn group(&self, flag: &str) -> Option<&AffixGroup> {
        self.groups.get(flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AFF: &str = "\
SET UTF-8
TRY esianrtolcdugmphbyfvkwz'
REP 2
REP f ph
REP alot a_lot

PFX A Y 1
PFX A   0     re         .

SFX D Y 4
SFX D   0     d          e
SFX D   y     ied        [^aeiou]y
SFX D   0     ed         [^ey]
SFX D   0     ed         [aeiou]y
";

    #[test]
    fn test_parse_directives() {
        let aff = AffixFile::parse(AFF).unwrap();
        assert!(aff.try_chars.starts_with("esian"));
        assert_eq!(aff.replacements.len(), 2);
        assert_eq!(aff.replacements[1], ("alot".to_string(), "a lot".to_string()));
        assert_eq!(aff.group("D").unwrap().rules.len(), 4);
        assert!(aff.group("A").unwrap().cross_product);
    }

    #[test]
    fn test_suffix_conditions() {
        let aff = AffixFile::parse(AFF).unwrap();
        let group = aff.group("D").unwrap();
        let forms = |stem: &str| -> Vec<String> {
            group
                .rules
                .iter()
                .filter_map(|r| r.apply(AffixKind::Suffix, stem))
                .collect()
        };

        assert_eq!(forms("create"), vec!["created"]);
        assert_eq!(forms("carry"), vec!["carried"]);
        assert_eq!(forms("play"), vec!["played"]);
        assert_eq!(forms("walk"), vec!["walked"]);
    }

    #[test]
    fn test_prefix_rule() {
        let aff = AffixFile::parse(AFF).unwrap();
        let rule = &aff.group("A").unwrap().rules[0];
        assert_eq!(rule.apply(AffixKind::Prefix, "load").as_deref(), Some("reload"));
    }

    #[test]
    fn test_flag_modes() {
        assert_eq!(FlagMode::Char.split("AB"), vec!["A", "B"]);
        assert_eq!(FlagMode::Long.split("AaBb"), vec!["Aa", "Bb"]);
        assert_eq!(FlagMode::Num.split("101,20"), vec!["101", "20"]);
    }

    #[test]
    fn test_malformed_rule() {
        let err = AffixFile::parse("SFX D Y 1\nSFX D 0\n").unwrap_err();
        assert!(matches!(err, AffixError::Malformed { line: 2, .. }));
    }
}
