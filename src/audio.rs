//! Audio system using Web Audio API
//!
//! Square-wave chiptune effects and a looping background melody, all
//! synthesized on the fly. Missing audio support just means silence.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::SoundCue;

/// Background melody: (frequency Hz, duration s)
const MELODY: [(f32, f64); 8] = [
    (261.63, 0.3), // C4
    (293.66, 0.3), // D4
    (329.63, 0.3), // E4
    (293.66, 0.3), // D4
    (261.63, 0.6), // C4
    (329.63, 0.3), // E4
    (392.00, 0.3), // G4
    (329.63, 0.6), // E4
];

/// Silence between melody repeats (s)
const MELODY_GAP: f64 = 1.0;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    sfx_gain: f32,
    music_gain: f32,
    music_playing: bool,
    /// Audio-clock time at which the next melody loop should be scheduled
    next_loop_at: f64,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            sfx_gain: settings.sfx_gain(),
            music_gain: settings.music_gain(),
            music_playing: false,
            next_loop_at: 0.0,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx
            && ctx.state() == web_sys::AudioContextState::Suspended
        {
            let _ = ctx.resume();
        }
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn start_music(&mut self) {
        let Some(ctx) = &self.ctx else { return };
        if self.music_playing {
            return;
        }
        self.music_playing = true;
        self.next_loop_at = ctx.current_time();
        log::info!("Music on");
    }

    /// Stops scheduling further loops; notes already queued play out
    pub fn stop_music(&mut self) {
        if self.music_playing {
            self.music_playing = false;
            log::info!("Music off");
        }
    }

    pub fn toggle_music(&mut self) {
        if self.music_playing {
            self.stop_music();
        } else {
            self.start_music();
        }
    }

    /// Schedule the next melody loop once the previous one (plus gap) has
    /// finished. Called from the frame callback.
    pub fn update(&mut self) {
        if !self.music_playing {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        let now = ctx.current_time();
        if now < self.next_loop_at {
            return;
        }

        let mut t = now;
        for (freq, duration) in MELODY {
            self.note(ctx, freq, t, duration, self.music_gain);
            t += duration;
        }
        self.next_loop_at = t + MELODY_GAP;
    }

    /// Play the effect for a simulation sound cue
    pub fn play(&self, cue: SoundCue) {
        let vol = self.sfx_gain;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            SoundCue::Collect => self.play_collect(ctx, vol),
            SoundCue::Jump => self.play_jump(ctx, vol),
            SoundCue::Hit => self.play_hit(ctx, vol),
            SoundCue::Victory => self.play_victory(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// One decaying square note starting at `t`
    fn note(&self, ctx: &AudioContext, freq: f32, t: f64, duration: f64, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) else {
            return;
        };
        osc.frequency().set_value_at_time(freq, t).ok();
        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + duration)
            .ok();
        osc.start_with_when(t).ok();
        osc.stop_with_when(t + duration).ok();
    }

    /// Coin - C5 E5 G5 arpeggio
    fn play_collect(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 523.25, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(523.25, t).ok();
        osc.frequency().set_value_at_time(659.25, t + 0.1).ok();
        osc.frequency().set_value_at_time(783.99, t + 0.2).ok();
        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }

    /// Jump - quick upward sweep
    fn play_jump(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(150.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(400.0, t + 0.1)
            .ok();
        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Hit - harsh descending buzz
    fn play_hit(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(200.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(50.0, t + 0.3)
            .ok();
        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }

    /// Victory - C major fanfare
    fn play_victory(&self, ctx: &AudioContext, vol: f32) {
        let start = ctx.current_time();
        for (i, freq) in [523.25, 659.25, 783.99, 1046.50].iter().enumerate() {
            let t = start + i as f64 * 0.2;
            self.note(ctx, *freq, t, 0.4, vol * 0.3);
        }
    }
}
