use std::collections::HashMap;

use astro_canvas::hosts::{ChartScene, ParticleBackground, SkyMapScene, TimelineScene};
use astro_canvas::{InputEvent, Preferences, SceneRunner};

use crate::canvas::WebCanvas;

/// Mounted hosts keyed by the handle JS holds on to.
///
/// wasm-bindgen cannot export generic runners, so every mounted host lives
/// here and JS addresses it by a plain `u32`. Handle 0 is never issued and
/// stands for "mount failed".
pub struct Registry<H> {
    hosts: HashMap<u32, H>,
    next: u32,
}

impl<H> Registry<H> {
    pub fn new() -> Self {
        Self {
            hosts: HashMap::new(),
            next: 1,
        }
    }

    pub fn insert(&mut self, host: H) -> u32 {
        let handle = self.next;
        self.next = self.next.wrapping_add(1).max(1);
        self.hosts.insert(handle, host);
        handle
    }

    pub fn get_mut(&mut self, handle: u32) -> Option<&mut H> {
        self.hosts.get_mut(&handle)
    }

    pub fn remove(&mut self, handle: u32) -> Option<H> {
        self.hosts.remove(&handle)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut H> {
        self.hosts.values_mut()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

impl<H> Default for Registry<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// One mounted canvas host.
pub enum Host {
    Background(SceneRunner<ParticleBackground, WebCanvas>),
    SkyMap(SceneRunner<SkyMapScene, WebCanvas>),
    Chart(SceneRunner<ChartScene, WebCanvas>),
    Timeline(SceneRunner<TimelineScene, WebCanvas>),
}

macro_rules! each_runner {
    ($host:expr, $runner:ident => $body:expr) => {
        match $host {
            Host::Background($runner) => $body,
            Host::SkyMap($runner) => $body,
            Host::Chart($runner) => $body,
            Host::Timeline($runner) => $body,
        }
    };
}

impl Host {
    pub fn kind(&self) -> &'static str {
        match self {
            Host::Background(_) => "background",
            Host::SkyMap(_) => "sky-map",
            Host::Chart(_) => "chart",
            Host::Timeline(_) => "timeline",
        }
    }

    pub fn tick(&mut self, timestamp_ms: f64) -> bool {
        each_runner!(self, r => r.tick(timestamp_ms))
    }

    pub fn push_input(&mut self, event: InputEvent) {
        each_runner!(self, r => r.push_input(event))
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        each_runner!(self, r => r.resize(width, height))
    }

    pub fn pause(&mut self) {
        each_runner!(self, r => r.pause())
    }

    pub fn resume(&mut self) {
        each_runner!(self, r => r.resume())
    }

    pub fn unmount(&mut self) {
        each_runner!(self, r => r.unmount())
    }

    /// Push a settings change into a mounted host. Only fields that differ
    /// between `previous` and `prefs` touch the host, so an unrelated
    /// change never resumes something the user paused.
    pub fn apply_preferences(&mut self, previous: &Preferences, prefs: &Preferences) {
        match self {
            Host::Background(r) => {
                let config = prefs.background_config();
                if config != previous.background_config() {
                    let scene = r.scene_mut();
                    scene.set_mode(config.mode);
                    scene.set_intensity(config.intensity);
                }
                if prefs.reduced_motion != previous.reduced_motion {
                    if prefs.reduced_motion {
                        r.pause();
                    } else {
                        r.resume();
                    }
                }
            }
            Host::SkyMap(r) => {
                if prefs.sky_layers != previous.sky_layers {
                    r.scene_mut().set_layers(prefs.sky_layers);
                }
            }
            Host::Timeline(r) => {
                let auto_rotate = prefs.timeline_config().auto_rotate;
                if auto_rotate != previous.timeline_config().auto_rotate {
                    let projector = r.scene_mut().view_mut().projector_mut();
                    if auto_rotate {
                        projector.resume();
                    } else {
                        projector.pause();
                    }
                }
            }
            Host::Chart(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astro_canvas::hosts::TimelineScene;
    use astro_canvas::timeline::builtin_events;
    use astro_canvas::{FieldConfig, TimelineConfig};

    fn timeline_host() -> Host {
        let scene = TimelineScene::new(builtin_events(), &TimelineConfig::default());
        Host::Timeline(SceneRunner::new(scene))
    }

    fn timeline_running(host: &mut Host) -> bool {
        match host {
            Host::Timeline(r) => r.scene_mut().view_mut().projector_mut().is_running(),
            _ => false,
        }
    }

    #[test]
    fn handles_start_at_one_and_are_unique() {
        let mut registry = Registry::new();
        let a = registry.insert("a");
        let b = registry.insert("b");
        assert_eq!(a, 1);
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn removed_handle_is_gone() {
        let mut registry = Registry::new();
        let a = registry.insert(10);
        assert_eq!(registry.remove(a), Some(10));
        assert!(registry.get_mut(a).is_none());
        assert!(registry.remove(a).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn handle_zero_is_never_issued() {
        let mut registry = Registry { hosts: HashMap::new(), next: u32::MAX };
        assert_eq!(registry.insert(()), u32::MAX);
        assert_eq!(registry.insert(()), 1);
    }

    #[test]
    fn unrelated_preference_keeps_paused_rotation() {
        let mut host = timeline_host();
        if let Host::Timeline(r) = &mut host {
            r.scene_mut().view_mut().projector_mut().pause();
        }
        let previous = Preferences::default();
        let mut next = previous.clone();
        next.sky_layers.labels = false;
        host.apply_preferences(&previous, &next);
        assert!(!timeline_running(&mut host));
    }

    #[test]
    fn auto_rotate_change_reaches_timeline() {
        let mut host = timeline_host();
        let previous = Preferences::default();
        let off = Preferences { timeline_auto_rotate: false, ..previous.clone() };
        host.apply_preferences(&previous, &off);
        assert!(!timeline_running(&mut host));
        host.apply_preferences(&off, &previous);
        assert!(timeline_running(&mut host));
    }

    #[test]
    fn unrelated_preference_keeps_paused_background() {
        let mut runner = SceneRunner::new(ParticleBackground::new(FieldConfig::default()));
        runner.pause();
        let mut host = Host::Background(runner);
        let previous = Preferences::default();
        let next = Preferences { timeline_auto_rotate: false, ..previous.clone() };
        host.apply_preferences(&previous, &next);
        match &host {
            Host::Background(r) => assert!(!r.is_running()),
            _ => unreachable!(),
        }
    }
}
