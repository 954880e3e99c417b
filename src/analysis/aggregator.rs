use super::AggregatedContributor;
use crate::github::{ContributorStat, MergeRequestStat};
use std::collections::{BTreeSet, HashMap};

const SECONDS_PER_WEEK: i64 = 7 * 24 * 60 * 60;

/// Folds commit statistics and merged pull requests into one record per login.
///
/// Commit statistics are visited first, so a login present in both sources keeps the
/// avatar reported by the statistics endpoint. Output preserves first-encounter order.
/// Entries without an author, on either side, are skipped.
pub fn aggregate(
    stats: &[ContributorStat],
    merged: &[MergeRequestStat],
) -> Vec<AggregatedContributor> {
    let mut contributors: Vec<AggregatedContributor> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut active_weeks: Vec<BTreeSet<i64>> = Vec::new();

    let mut entry_for = |login: &str,
                         avatar_url: &str,
                         contributors: &mut Vec<AggregatedContributor>,
                         active_weeks: &mut Vec<BTreeSet<i64>>|
     -> usize {
        *index.entry(login.to_string()).or_insert_with(|| {
            contributors.push(AggregatedContributor::new(login, avatar_url));
            active_weeks.push(BTreeSet::new());
            contributors.len() - 1
        })
    };

    for stat in stats {
        let Some(author) = &stat.author else {
            continue;
        };
        let slot = entry_for(
            &author.login,
            &author.avatar_url,
            &mut contributors,
            &mut active_weeks,
        );
        let contributor = &mut contributors[slot];
        contributor.total_commits += stat.total;

        for week in &stat.weeks {
            contributor.total_additions += week.additions;
            contributor.total_deletions += week.deletions;
            if week.commits > 0 {
                active_weeks[slot].insert(week.week_start);
            }
        }
    }

    for request in merged {
        let Some(author) = &request.author else {
            continue;
        };
        let slot = entry_for(
            &author.login,
            &author.avatar_url,
            &mut contributors,
            &mut active_weeks,
        );
        contributors[slot].total_merged_requests += 1;
    }

    for (contributor, weeks) in contributors.iter_mut().zip(&active_weeks) {
        contributor.net_lines =
            contributor.total_additions as i64 - contributor.total_deletions as i64;
        apply_activity_metrics(contributor, weeks);
    }

    contributors
}

/// velocity = commits per active week; consistency = active weeks over the span from the first
/// to the last active week. Both are 0 without weekly activity.
fn apply_activity_metrics(contributor: &mut AggregatedContributor, weeks: &BTreeSet<i64>) {
    let active = weeks.len() as u32;
    contributor.active_weeks = active;

    let (Some(first), Some(last)) = (weeks.first(), weeks.last()) else {
        contributor.velocity = 0.0;
        contributor.consistency = 0.0;
        return;
    };

    let span_weeks = ((last - first) / SECONDS_PER_WEEK + 1).max(active as i64);
    contributor.velocity = contributor.total_commits as f64 / active as f64;
    contributor.consistency = active as f64 / span_weeks as f64;
}
