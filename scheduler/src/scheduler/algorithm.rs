use super::{
    FirstComeFirstServed, Policy, PriorityPolicy, RoundRobin, ShortestJobFirst,
    ShortestRemainingTime,
};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// Scheduling algorithm tag, fixed for the lifetime of a scheduler.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    #[default]
    Fcfs,
    RoundRobin,
    Sjf,
    Srtf,
    Priority,
    PriorityPreemptive,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Fcfs,
        Algorithm::RoundRobin,
        Algorithm::Sjf,
        Algorithm::Srtf,
        Algorithm::Priority,
        Algorithm::PriorityPreemptive,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::RoundRobin => "rr",
            Self::Sjf => "sjf",
            Self::Srtf => "srtf",
            Self::Priority => "priority",
            Self::PriorityPreemptive => "priority_preemptive",
        }
    }

    /// Lenient parse: unknown tags fall back to FCFS ordering.
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or_else(|err| {
            warn!("{err}, falling back to {}", Algorithm::Fcfs);
            Algorithm::Fcfs
        })
    }

    pub fn policy(&self) -> Box<dyn Policy> {
        match self {
            Self::Fcfs => Box::new(FirstComeFirstServed),
            Self::RoundRobin => Box::new(RoundRobin),
            Self::Sjf => Box::new(ShortestJobFirst),
            Self::Srtf => Box::new(ShortestRemainingTime),
            Self::Priority => Box::new(PriorityPolicy::new()),
            Self::PriorityPreemptive => Box::new(PriorityPolicy::with_preemption()),
        }
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "fcfs" | "fifo" => Ok(Self::Fcfs),
            "rr" | "round_robin" | "roundrobin" => Ok(Self::RoundRobin),
            "sjf" => Ok(Self::Sjf),
            "srtf" | "srt" => Ok(Self::Srtf),
            "priority" | "prio" => Ok(Self::Priority),
            "priority_preemptive" | "prio_preemptive" | "ppriority" => {
                Ok(Self::PriorityPreemptive)
            }
            _ => Err(format!(
                "unknown algorithm '{s}'. Valid: fcfs, rr, sjf, srtf, priority, priority_preemptive"
            )),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Algorithm {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.as_str().parse::<Algorithm>(), Ok(algorithm));
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("Round-Robin".parse::<Algorithm>(), Ok(Algorithm::RoundRobin));
        assert_eq!(" SRTF ".parse::<Algorithm>(), Ok(Algorithm::Srtf));
    }

    #[test]
    fn test_unknown_tag_is_strict_error_but_lenient_fallback() {
        assert!("lottery".parse::<Algorithm>().is_err());
        assert_eq!(Algorithm::from_tag("lottery"), Algorithm::Fcfs);

        let parsed: Algorithm = serde_json::from_str("\"lottery\"").unwrap();
        assert_eq!(parsed, Algorithm::Fcfs);
    }

    #[test]
    fn test_policy_matches_tag() {
        assert_eq!(Algorithm::RoundRobin.policy().name(), "Round Robin");
        assert!(Algorithm::RoundRobin.policy().quantum_preemption());
        assert!(Algorithm::Srtf.policy().preemptive());
        assert!(Algorithm::PriorityPreemptive.policy().preemptive());
        assert!(!Algorithm::Priority.policy().preemptive());
    }
}
