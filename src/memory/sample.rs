//! Bundled sample transcript: a payment-gateway incident in a team ops channel.

/// Multi-party incident chat used as the default extraction input.
pub const SAMPLE_TRANSCRIPT: &str = r#"[10:03 AM] Sarah (Lead): Ops channel is open. Who is on point for the payment gateway?
[10:04 AM] Alex (Dev): I'm here. Why? Dashboards look green.
[10:05 AM] Sarah (Lead): Users are reporting 504 Gateway Timeouts on checkout.
[10:06 AM] Marcus (Junior): Uh, I just merged PR #402 ten minutes ago. Could that be it?
[10:06 AM] Alex (Dev): #402 was just a UI color tweak, Marcus. It shouldn't touch the backend.
[10:07 AM] Sarah (Lead): Error rate just spiked to 15%. We are losing money.
[10:08 AM] David (DBA): Database CPU is hitting 99%. Something is hammering the 'Orders' table.
[10:09 AM] Alex (Dev): I'm looking at the logs. It's not the UI. It's an N+1 query issue.
[10:09 AM] Marcus (Junior): I... might have added a "related products" loop to the checkout page in that PR.
[10:10 AM] Alex (Dev): Marcus! You said it was CSS only!
[10:11 AM] Sarah (Lead): Stop the blame. Fix the bleeding. David, can we kill the slow queries?
[10:12 AM] David (DBA): I can, but they'll just respawn. We need to rollback the deploy.
[10:13 AM] Alex (Dev): Rollback initiated. CI/CD is slow today though.
[10:14 AM] Marcus (Junior): I feel sick. I'm so sorry guys.
[10:15 AM] Sarah (Lead): Deep breaths, Marcus. We review process later. Focus on status now.
[10:16 AM] David (DBA): DB load is still 90%. Is the rollback live?
[10:17 AM] Alex (Dev): GitHub Actions is queuing. Estimated 5 mins. This is a nightmare.
[10:18 AM] Sarah (Lead): I'm notifying the VP. David, throttle traffic to 50% to save the DB.
[10:19 AM] David (DBA): Throttling applied. User experience will degrade but we won't crash hard.
[10:20 AM] Alex (Dev): Rollback deployed to Staging. Verifying... looks clean.
[10:21 AM] Alex (Dev): Pushing to Prod now.
[10:22 AM] Marcus (Junior): Should I draft the incident report?
[10:23 AM] Sarah (Lead): Yes. Be honest about the PR scope creep.
[10:24 AM] David (DBA): CPU dropping. 80%... 60%... we are stabilizing.
[10:25 AM] Alex (Dev): Rollback complete. 504s are gone.
[10:26 AM] Sarah (Lead): Okay, lift the throttle, David.
[10:27 AM] Sarah (Lead): Everyone take 5. We do a post-mortem at 11:00.
[10:28 AM] Alex (Dev): I need a whiskey. It's 10 AM but I don't care.
[10:29 AM] Marcus (Junior): I'm going to go hide in the server room.
[10:30 AM] Sarah (Lead): Good save team. But we are never deploying on Fridays again.."#;

/// Default user message for the before/after comparison.
pub const SAMPLE_USER_MESSAGE: &str = "Steve is back in the office and asking for the logs.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_transcript_is_multi_party() {
        for name in ["Sarah (Lead)", "Alex (Dev)", "Marcus (Junior)", "David (DBA)"] {
            assert!(SAMPLE_TRANSCRIPT.contains(name), "missing speaker {name}");
        }
        assert_eq!(SAMPLE_TRANSCRIPT.lines().count(), 30);
    }
}
