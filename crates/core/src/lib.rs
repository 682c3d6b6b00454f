#![forbid(unsafe_code)]

pub mod dates;
pub mod naming;

pub mod ids {
    use std::fmt;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct CourseId(i64);

    impl CourseId {
        pub fn try_new(value: i64) -> Result<Self, CourseIdError> {
            if value <= 0 {
                return Err(CourseIdError::NotPositive);
            }
            Ok(Self(value))
        }

        pub fn get(self) -> i64 {
            self.0
        }
    }

    impl fmt::Display for CourseId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum CourseIdError {
        NotPositive,
    }

    /// Row id of a section. Unlike [`SectionIndex`] it survives renumbering.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct SectionId(i64);

    impl SectionId {
        pub fn try_new(value: i64) -> Result<Self, SectionIdError> {
            if value <= 0 {
                return Err(SectionIdError::NotPositive);
            }
            Ok(Self(value))
        }

        pub fn get(self) -> i64 {
            self.0
        }
    }

    impl fmt::Display for SectionId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum SectionIdError {
        NotPositive,
    }

    /// Position of a section inside its course. Index 0 is the general section.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct SectionIndex(i64);

    impl SectionIndex {
        pub const GENERAL: SectionIndex = SectionIndex(0);

        pub fn try_new(value: i64) -> Result<Self, SectionIndexError> {
            if value < 0 {
                return Err(SectionIndexError::Negative);
            }
            Ok(Self(value))
        }

        pub fn get(self) -> i64 {
            self.0
        }

        pub fn is_general(self) -> bool {
            self.0 == 0
        }
    }

    impl fmt::Display for SectionIndex {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum SectionIndexError {
        Negative,
    }

    /// Course format tag, e.g. `cvo`. Stored verbatim in `course.format`.
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub struct FormatName(String);

    impl FormatName {
        pub fn try_new(value: impl Into<String>) -> Result<Self, FormatNameError> {
            let value = value.into();
            validate_format_name(&value)?;
            Ok(Self(value))
        }

        pub fn as_str(&self) -> &str {
            &self.0
        }

        /// Frankenstyle component name used for the plugin's config rows.
        pub fn plugin_component(&self) -> String {
            format!("format_{}", self.0)
        }
    }

    impl fmt::Display for FormatName {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum FormatNameError {
        Empty,
        TooLong,
        InvalidFirstChar,
        InvalidChar { ch: char, index: usize },
    }

    fn validate_format_name(value: &str) -> Result<(), FormatNameError> {
        let Some(first) = value.chars().next() else {
            return Err(FormatNameError::Empty);
        };
        if value.len() > 21 {
            return Err(FormatNameError::TooLong);
        }
        if !first.is_ascii_lowercase() {
            return Err(FormatNameError::InvalidFirstChar);
        }
        for (index, ch) in value.chars().enumerate().skip(1) {
            if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' {
                continue;
            }
            return Err(FormatNameError::InvalidChar { ch, index });
        }
        Ok(())
    }
}

pub mod version {
    use std::fmt;
    use std::str::FromStr;

    /// Plugin version in the `YYYYMMDDXX` convention. Ordering is numeric.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct PluginVersion(i64);

    impl PluginVersion {
        pub const fn new(value: i64) -> Self {
            Self(value)
        }

        pub fn get(self) -> i64 {
            self.0
        }
    }

    impl fmt::Display for PluginVersion {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum PluginVersionError {
        Empty,
        NotANumber,
        Negative,
    }

    impl FromStr for PluginVersion {
        type Err = PluginVersionError;

        fn from_str(value: &str) -> Result<Self, Self::Err> {
            let value = value.trim();
            if value.is_empty() {
                return Err(PluginVersionError::Empty);
            }
            let parsed = value
                .parse::<i64>()
                .map_err(|_| PluginVersionError::NotANumber)?;
            if parsed < 0 {
                return Err(PluginVersionError::Negative);
            }
            Ok(Self(parsed))
        }
    }
}
