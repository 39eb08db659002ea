//! The dashboard's fixed task list.

use super::task::{PollTask, Tier};
use crate::core::api::{ApiClient, Fragment, NetworkSpeed};
use crate::core::config::Config;
use crate::core::render::views::{
    client_ip_view, fragment_view, network_speed_view, ping_view, server_ip_view, storage_view,
    system_info_view,
};

/// Tier each fragment refreshes on
pub fn fragment_tier(fragment: Fragment) -> Tier {
    match fragment {
        Fragment::SystemInfo => Tier::Fast,
        Fragment::Media => Tier::Medium,
        Fragment::Storage | Fragment::Services | Fragment::Forecast => Tier::Slow,
    }
}

pub fn fragment_task_name(fragment: Fragment) -> String {
    format!("html/{}", fragment.path())
}

/// Every task the dashboard polls, grouped by tier
pub fn dashboard_tasks(client: &ApiClient, config: &Config) -> Vec<PollTask> {
    let full_scale = config.throughput_full_scale_mbps;
    let mut tasks = Vec::new();

    let c = client.clone();
    tasks.push(PollTask::new(
        "system_info",
        Tier::Fast.period(),
        move || {
            let c = c.clone();
            async move { c.system_info().await }
        },
        system_info_view,
    ));

    let c = client.clone();
    tasks.push(PollTask::new(
        "network_speed",
        Tier::Medium.period(),
        move || {
            let c = c.clone();
            async move { c.network_speed().await }
        },
        move |speed: &NetworkSpeed| network_speed_view(speed, full_scale),
    ));

    let c = client.clone();
    tasks.push(PollTask::new(
        "ping",
        Tier::Medium.period(),
        move || {
            let c = c.clone();
            async move { c.ping().await }
        },
        ping_view,
    ));

    let c = client.clone();
    tasks.push(PollTask::new(
        "ip_address",
        Tier::Slow.period(),
        move || {
            let c = c.clone();
            async move { c.ip_address().await }
        },
        server_ip_view,
    ));

    let c = client.clone();
    tasks.push(PollTask::new(
        "client_ip",
        Tier::Slow.period(),
        move || {
            let c = c.clone();
            async move { c.client_ip().await }
        },
        client_ip_view,
    ));

    let c = client.clone();
    tasks.push(PollTask::new(
        "storage",
        Tier::Slow.period(),
        move || {
            let c = c.clone();
            async move { c.storage().await }
        },
        storage_view,
    ));

    if config.html_fragments {
        for fragment in Fragment::ALL {
            let c = client.clone();
            tasks.push(PollTask::new(
                fragment_task_name(fragment),
                fragment_tier(fragment).period(),
                move || {
                    let c = c.clone();
                    async move { c.fragment(fragment).await }
                },
                move |markup: &String| fragment_view(fragment, markup),
            ));
        }
    }

    tasks
}
