//! Pure render functions, one per metric.
//!
//! Each takes a fetched payload and returns the updates for the display
//! targets the dashboard pages have always used.

use super::format::{
    format_load, format_mbps, format_percent, format_ping, format_uptime, free_out_of,
    group_thousands, load_bar_width, throughput_bar_width,
};
use super::view::RenderedView;
use crate::core::api::{
    ClientIp, Fragment, IpAddress, NetworkSpeed, Numeric, PathUsage, Ping, StorageReport,
    SystemInfo,
};

/// Load average windows, in the order the API sends them
pub const LOAD_WINDOWS: [u32; 3] = [1, 5, 15];

pub fn server_ip_view(ip: &IpAddress) -> RenderedView {
    RenderedView::new().text("server_ip", ip.wan_ip.trim())
}

pub fn client_ip_view(ip: &ClientIp) -> RenderedView {
    RenderedView::new().text("client_ip", ip.ip.trim())
}

pub fn ping_view(ping: &Ping) -> RenderedView {
    let text = match (&ping.ping, ping.ping.as_f64()) {
        (_, Some(ms)) => format_ping(ms),
        // shown as sent, like the page did
        (Numeric::Text(raw), None) => format!("{} ms", raw.trim()),
        (Numeric::Number(n), None) => format!("{} ms", n),
    };
    RenderedView::new().text("ping", text)
}

pub fn network_speed_view(speed: &NetworkSpeed, full_scale_mbps: f64) -> RenderedView {
    RenderedView::new()
        .text("download", format_mbps(speed.down))
        .text("upload", format_mbps(speed.up))
        .width(
            "progress-bar-down",
            throughput_bar_width(speed.down, full_scale_mbps),
        )
        .width(
            "progress-bar-up",
            throughput_bar_width(speed.up, full_scale_mbps),
        )
}

/// Percent label, free/total tooltip and bar for one partition
pub fn render_storage_path(path: &str, usage: &PathUsage) -> RenderedView {
    RenderedView::new()
        .text(&format!("{}-storage", path), format_percent(usage.pct))
        .tooltip(
            &format!("tooltip-{}", path),
            free_out_of(&usage.free, &usage.total),
        )
        .width(&format!("progressbar-{}", path), usage.pct)
}

/// Every configured partition, then the system-wide total under the name `total`
pub fn storage_view(report: &StorageReport) -> RenderedView {
    let mut view = RenderedView::new();
    for (path, usage) in &report.paths {
        view.extend(render_storage_path(path, usage));
    }
    if let Some(total) = &report.total {
        view.extend(render_storage_path("total", total));
    }
    view
}

pub fn system_info_view(info: &SystemInfo) -> RenderedView {
    let used = format_percent(info.mem_used_pct);
    let mut view = RenderedView::new()
        .text("uptime", format_uptime(&info.uptime_formatted))
        .text("memory-progress-bar-base", used.clone())
        .tooltip(
            "memory-tooltip",
            free_out_of(
                &format!("{} MB", group_thousands(info.mem_available)),
                &format!("{} MB", group_thousands(info.mem_total)),
            ),
        )
        .width("progress-bar-min", info.mem_bars.xmin)
        .text("progress-bar-min", used)
        .width("progress-bar-mid", info.mem_bars.xmid)
        .width("progress-bar-max", info.mem_bars.xmax);

    for (window, load) in LOAD_WINDOWS.iter().zip(&info.load_avg) {
        view = view
            .text(&format!("{}-min-load", window), format_load(*load))
            .width(&format!("{}-min-load-bar", window), load_bar_width(*load));
    }

    view
}

pub fn fragment_view(fragment: Fragment, markup: &str) -> RenderedView {
    RenderedView::new().markup(fragment.container(), markup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::{MemoryBars, Uptime, UptimePart};
    use crate::core::render::view::{DisplayTarget, Write};
    use std::collections::BTreeMap;

    fn is_text(w: &Write) -> bool {
        matches!(w, Write::Text(_))
    }

    fn is_width(w: &Write) -> bool {
        matches!(w, Write::Width(_))
    }

    fn is_tooltip(w: &Write) -> bool {
        matches!(w, Write::Tooltip(_))
    }

    fn sample_system_info() -> SystemInfo {
        SystemInfo {
            uptime_formatted: Uptime {
                days: UptimePart::Text("6 days".to_string()),
                hours: UptimePart::Text("2 hours".to_string()),
                min: UptimePart::Text("26 minutes".to_string()),
            },
            mem_used_pct: 62.5,
            mem_available: 2953.4,
            mem_total: 7876.88671875,
            mem_bars: MemoryBars {
                xmin: 50.0,
                xmid: 12.5,
                xmax: 0.0,
            },
            load_avg: vec![0.52, 0.51, 0.43],
        }
    }

    #[test]
    fn test_render_storage_path_example() {
        let usage = PathUsage {
            pct: 42.6,
            free: "10GB".to_string(),
            total: "50GB".to_string(),
            used: None,
        };
        let view = render_storage_path("root", &usage);

        assert_eq!(
            view.find(&DisplayTarget::id("root-storage"), is_text),
            Some(&Write::Text("43%".to_string()))
        );
        assert_eq!(
            view.find(&DisplayTarget::id("tooltip-root"), is_tooltip),
            Some(&Write::Tooltip("10GB free out of 50GB".to_string()))
        );
        assert_eq!(
            view.find(&DisplayTarget::id("progressbar-root"), is_width),
            Some(&Write::Width(42.6))
        );
    }

    #[test]
    fn test_storage_view_includes_total() {
        let usage = |pct: f64| PathUsage {
            pct,
            free: "1 GB".to_string(),
            total: "2 GB".to_string(),
            used: None,
        };
        let mut paths = BTreeMap::new();
        paths.insert("Home".to_string(), usage(44.4));
        paths.insert("Media".to_string(), usage(80.0));
        let report = StorageReport {
            total: Some(usage(60.0)),
            paths,
        };

        let names: Vec<String> = storage_view(&report)
            .targets()
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "#Home-storage",
                "#tooltip-Home",
                "#progressbar-Home",
                "#Media-storage",
                "#tooltip-Media",
                "#progressbar-Media",
                "#total-storage",
                "#tooltip-total",
                "#progressbar-total",
            ]
        );
    }

    #[test]
    fn test_network_speed_view() {
        let view = network_speed_view(&NetworkSpeed { up: 0.5, down: 3.0 }, 60.0);
        assert_eq!(
            view.find(&DisplayTarget::id("download"), is_text),
            Some(&Write::Text("3.00 Mbps".to_string()))
        );
        assert_eq!(
            view.find(&DisplayTarget::id("upload"), is_text),
            Some(&Write::Text("0.50 Mbps".to_string()))
        );
        assert_eq!(
            view.find(&DisplayTarget::id("progress-bar-down"), is_width),
            Some(&Write::Width(3.0 * (10.0 / 6.0)))
        );
    }

    #[test]
    fn test_ping_view() {
        let view = ping_view(&Ping {
            ping: Numeric::Text("23".to_string()),
        });
        assert_eq!(
            view.find(&DisplayTarget::id("ping"), is_text),
            Some(&Write::Text("23 ms".to_string()))
        );
    }

    #[test]
    fn test_system_info_memory_and_uptime() {
        let view = system_info_view(&sample_system_info());

        assert_eq!(
            view.find(&DisplayTarget::id("uptime"), is_text),
            Some(&Write::Text("6 days, 2 hours, 26 minutes".to_string()))
        );
        assert_eq!(
            view.find(&DisplayTarget::id("memory-tooltip"), is_tooltip),
            Some(&Write::Tooltip(
                "2,953 MB free out of 7,877 MB".to_string()
            ))
        );
        assert_eq!(
            view.find(&DisplayTarget::id("progress-bar-min"), is_text),
            Some(&Write::Text("63%".to_string()))
        );
        assert_eq!(
            view.find(&DisplayTarget::id("progress-bar-mid"), is_width),
            Some(&Write::Width(12.5))
        );
    }

    #[test]
    fn test_load_windows_are_independent() {
        let view = system_info_view(&sample_system_info());
        let expected = [("1", "52%", 52.0), ("5", "51%", 51.0), ("15", "43%", 43.0)];

        for (window, text, width) in expected {
            assert_eq!(
                view.find(&DisplayTarget::id(format!("{}-min-load", window)), is_text),
                Some(&Write::Text(text.to_string()))
            );
            assert_eq!(
                view.find(
                    &DisplayTarget::id(format!("{}-min-load-bar", window)),
                    is_width
                ),
                Some(&Write::Width(width))
            );
        }
    }

    #[test]
    fn test_short_load_list_renders_what_is_there() {
        let mut info = sample_system_info();
        info.load_avg = vec![0.1];
        let view = system_info_view(&info);
        assert!(view
            .find(&DisplayTarget::id("5-min-load"), is_text)
            .is_none());
        assert!(view
            .find(&DisplayTarget::id("1-min-load"), is_text)
            .is_some());
    }

    #[test]
    fn test_fragment_goes_to_container_class() {
        let view = fragment_view(Fragment::Forecast, "<p>Sunny</p>");
        assert_eq!(view.targets(), vec![DisplayTarget::class("weather")]);
    }
}
