mod tables;

pub use self::tables::{
    means as print_means_report, outcome as print_outcome, profile as print_profile_report,
    ranges as print_range_report, ranking as print_ranking_report,
    scaling as print_scaling_report,
};
