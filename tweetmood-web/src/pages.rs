//! HTML pages, rendered with minijinja.
//!
//! Templates are compiled into the binary and registered under `.html` names,
//! which turns on HTML auto-escaping for every interpolated value.
use minijinja::{Environment, context};
use tweetmood_social::{FollowedAccount, TimelineResult};

const TIMELINE: &str = "timeline.html";
const FOLLOWING: &str = "following.html";

pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(TIMELINE, include_str!("../templates/timeline.html"))?;
        env.add_template(FOLLOWING, include_str!("../templates/following.html"))?;
        Ok(Self { env })
    }

    pub fn render_timeline(
        &self,
        timeline: &TimelineResult,
        median: Option<f64>,
    ) -> Result<String, minijinja::Error> {
        self.env.get_template(TIMELINE)?.render(context! {
            user => &timeline.user,
            count => timeline.count,
            median => median_label(median),
            posts => &timeline.posts,
        })
    }

    pub fn render_following(
        &self,
        handle: &str,
        accounts: &[FollowedAccount],
    ) -> Result<String, minijinja::Error> {
        self.env.get_template(FOLLOWING)?.render(context! {
            name => handle,
            accounts => accounts,
        })
    }
}

// `None` is spelled out by the template, outside the escaper.
fn median_label(median: Option<f64>) -> Option<String> {
    median.map(|value| format!("{value:.4}"))
}
