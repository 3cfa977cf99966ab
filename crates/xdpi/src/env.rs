// Author: Dustin Pilgrim
// License: MIT

use xdpi_core::source::EnvVar;

/// Variables toolkits consult when deciding how to scale.
pub const SCALING_VARS: &[&str] = &[
    "GDK_SCALE",
    "GDK_DPI_SCALE",
    "QT_AUTO_SCREEN_SCALE_FACTOR",
    "QT_ENABLE_HIGHDPI_SCALING",
    "QT_SCALE_FACTOR",
    "QT_SCREEN_SCALE_FACTORS",
    "QT_FONT_DPI",
    "QT_DEVICE_PIXEL_RATIO",
    "ELM_SCALE",
    "WINIT_X11_SCALE_FACTOR",
    "XCURSOR_SIZE",
];

pub fn collect(extra: &[String]) -> Vec<EnvVar> {
    collect_with(extra, |name| std::env::var(name).ok())
}

fn collect_with(extra: &[String], lookup: impl Fn(&str) -> Option<String>) -> Vec<EnvVar> {
    let mut names: Vec<&str> = SCALING_VARS.to_vec();
    for name in extra {
        if !names.contains(&name.as_str()) {
            names.push(name);
        }
    }

    names
        .into_iter()
        .map(|name| EnvVar {
            name: name.to_string(),
            value: lookup(name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_names_are_appended_once() {
        let extra = vec!["GDK_SCALE".to_string(), "MY_SCALE".to_string()];
        let vars = collect_with(&extra, |_| None);
        assert_eq!(vars.len(), SCALING_VARS.len() + 1);
        assert_eq!(vars.last().unwrap().name, "MY_SCALE");
    }

    #[test]
    fn values_come_from_lookup() {
        let vars = collect_with(&[], |name| (name == "GDK_SCALE").then(|| "2".to_string()));
        let gdk = vars.iter().find(|v| v.name == "GDK_SCALE").unwrap();
        assert_eq!(gdk.value.as_deref(), Some("2"));
        assert!(vars.iter().filter(|v| v.value.is_some()).count() == 1);
    }
}
