use anyhow::Result;
use bevy_ecs::system::Resource;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use crossbeam_channel::{Receiver, Sender, bounded};
use log::{error, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crate::config::AudioConfig;
use crate::event::{Event, EventType};

// Sound effects types that can be played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Move,
    Rotate,
    NewBrick,
    Land,
    LineClear,
    GameStart,
    GameOver,
}

impl SoundEffect {
    /// The effect that accompanies an event, if any.
    #[must_use]
    pub fn for_event(kind: EventType) -> Option<Self> {
        match kind {
            EventType::BrickMovingUp
            | EventType::BrickMovingDown
            | EventType::BrickMovingLeft
            | EventType::BrickMovingRight => Some(SoundEffect::Move),
            EventType::BrickRotate => Some(SoundEffect::Rotate),
            EventType::NewBrickDrop => Some(SoundEffect::NewBrick),
            EventType::BrickHitWall => Some(SoundEffect::Land),
            EventType::RowCompleted => Some(SoundEffect::LineClear),
            EventType::GameStarted => Some(SoundEffect::GameStart),
            EventType::GameOver => Some(SoundEffect::GameOver),
            _ => None,
        }
    }
}

// Command to control the audio thread
enum AudioCommand {
    PlaySound(SoundEffect),
    PlayMusic(bool), // true to start, false to stop
    SetVolume(f32),  // 0.0 to 1.0
    Quit,
}

#[derive(Resource)]
pub struct AudioState {
    sender: Option<Sender<AudioCommand>>,
    available: Arc<AtomicBool>,
    music_enabled: bool,
    sound_enabled: bool,
    volume: f32,
}

impl AudioState {
    pub fn new(config: &AudioConfig) -> Self {
        let (sender, receiver) = bounded(64);
        let available = Arc::new(AtomicBool::new(true));

        let thread_available = Arc::clone(&available);
        let volume = config.volume.clamp(0.0, 1.0);
        let music_enabled = config.music_enabled;
        let spawned = thread::Builder::new()
            .name("audio".into())
            .spawn(move || {
                if let Err(e) = run_audio_thread(&receiver, volume, music_enabled) {
                    warn!("Audio thread stopped: {e}");
                }
                thread_available.store(false, Ordering::Relaxed);
            });

        if let Err(e) = spawned {
            error!("Could not start audio thread: {e}");
            return Self::silent(config);
        }

        Self {
            sender: Some(sender),
            available,
            music_enabled,
            sound_enabled: config.sound_enabled,
            volume,
        }
    }

    /// An audio state with no output thread, every command is dropped.
    #[must_use]
    pub fn silent(config: &AudioConfig) -> Self {
        Self {
            sender: None,
            available: Arc::new(AtomicBool::new(false)),
            music_enabled: config.music_enabled,
            sound_enabled: config.sound_enabled,
            volume: config.volume.clamp(0.0, 1.0),
        }
    }

    #[must_use]
    pub fn is_audio_available(&self) -> bool {
        self.sender.is_some() && self.available.load(Ordering::Relaxed)
    }

    pub fn play_sound(&self, effect: SoundEffect) -> bool {
        if self.sound_enabled {
            if let Some(sender) = &self.sender {
                let _ = sender.try_send(AudioCommand::PlaySound(effect));
            }
            true
        } else {
            false
        }
    }

    /// Play whatever effect goes with `event`. Returns whether one was queued.
    pub fn play_event(&self, event: &Event) -> bool {
        SoundEffect::for_event(event.kind()).is_some_and(|effect| self.play_sound(effect))
    }

    #[must_use]
    pub fn is_music_enabled(&self) -> bool {
        self.music_enabled
    }

    #[must_use]
    pub fn is_sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn toggle_sound(&mut self) {
        self.sound_enabled = !self.sound_enabled;
    }

    #[must_use]
    pub fn get_volume(&self) -> f32 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);

        if let Some(sender) = &self.sender {
            let _ = sender.try_send(AudioCommand::SetVolume(self.volume));
        }
    }

    pub fn toggle_music(&mut self) {
        self.music_enabled = !self.music_enabled;

        if let Some(sender) = &self.sender {
            let _ = sender.try_send(AudioCommand::PlayMusic(self.music_enabled));
        }
    }
}

impl Drop for AudioState {
    fn drop(&mut self) {
        if let Some(sender) = self.sender.take() {
            let _ = sender.try_send(AudioCommand::Quit);
        }
    }
}

fn run_audio_thread(
    receiver: &Receiver<AudioCommand>,
    mut volume: f32,
    mut music_enabled: bool,
) -> Result<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow::anyhow!("No audio output device found"))?;
    let config = device.default_output_config()?;

    // The stream callback gets its own channels so it never blocks on the command queue
    let (sound_sender, sound_receiver) = bounded::<SoundEffect>(64);
    let (cmd_sender, cmd_receiver) = bounded::<(bool, f32)>(16);

    let _stream = match config.sample_format() {
        cpal::SampleFormat::F32 => run_audio_stream::<f32>(
            &device,
            &config.into(),
            sound_receiver,
            cmd_receiver,
            volume,
            music_enabled,
        )?,
        cpal::SampleFormat::I16 => run_audio_stream::<i16>(
            &device,
            &config.into(),
            sound_receiver,
            cmd_receiver,
            volume,
            music_enabled,
        )?,
        cpal::SampleFormat::U16 => run_audio_stream::<u16>(
            &device,
            &config.into(),
            sound_receiver,
            cmd_receiver,
            volume,
            music_enabled,
        )?,
        _ => return Err(anyhow::anyhow!("Unsupported audio format")),
    };

    // Channel closed means the game is gone
    while let Ok(command) = receiver.recv() {
        match command {
            AudioCommand::PlaySound(effect) => {
                let _ = sound_sender.try_send(effect);
            }
            AudioCommand::PlayMusic(enabled) => {
                music_enabled = enabled;
                let _ = cmd_sender.try_send((music_enabled, volume));
            }
            AudioCommand::SetVolume(new_volume) => {
                volume = new_volume;
                let _ = cmd_sender.try_send((music_enabled, volume));
            }
            AudioCommand::Quit => break,
        }
    }

    Ok(())
}

fn run_audio_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    sound_receiver: Receiver<SoundEffect>,
    cmd_receiver: Receiver<(bool, f32)>,
    initial_volume: f32,
    initial_music_enabled: bool,
) -> Result<cpal::Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let sample_rate = f64::from(config.sample_rate.0);
    let channels = usize::from(config.channels);

    let mut music_enabled = initial_music_enabled;
    let mut volume = initial_volume;

    // Active effects and the time they started
    let mut active_sounds: Vec<(SoundEffect, f64)> = Vec::new();
    let mut current_time = 0.0;
    let mut drone = Drone::default();

    let mut next_value = move || {
        while let Ok((new_music_enabled, new_volume)) = cmd_receiver.try_recv() {
            music_enabled = new_music_enabled;
            volume = new_volume;
        }

        while let Ok(effect) = sound_receiver.try_recv() {
            active_sounds.push((effect, current_time));
        }

        active_sounds.retain(|(_, start)| current_time - start <= MAX_EFFECT_SECONDS);

        let mut left = 0.0;
        let mut right = 0.0;
        for (effect, start_time) in &active_sounds {
            let (l, r) = generate_sound_sample(*effect, current_time - start_time);
            left += l;
            right += r;
        }

        if music_enabled {
            let sample = drone.next_sample(current_time, sample_rate);
            left += sample;
            right += sample;
        }

        current_time += 1.0 / sample_rate;

        (
            (left * volume).clamp(-1.0, 1.0),
            (right * volume).clamp(-1.0, 1.0),
        )
    };

    let err_fn = |err| error!("Error in audio stream: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            for frame in data.chunks_mut(channels) {
                let (left, right) = next_value();
                let left = T::from_sample(left);
                let right = T::from_sample(right);

                for (channel, sample) in frame.iter_mut().enumerate() {
                    *sample = if channel & 1 == 0 { left } else { right };
                }
            }
        },
        err_fn,
        None,
    )?;

    stream.play()?;

    Ok(stream)
}

/// Quiet drifting drone played under the effects while music is on.
///
/// The phase is accumulated per sample and kept in `[0, 1)`, so the tone stays
/// clean however long the game runs.
#[derive(Debug, Clone, Default)]
pub struct Drone {
    phase: f64,
}

impl Drone {
    /// Next mono sample at game time `t`, advancing one `1 / sample_rate` step.
    #[allow(clippy::cast_possible_truncation)]
    pub fn next_sample(&mut self, t: f64, sample_rate: f64) -> f32 {
        let freq = 110.0 + (t * 0.1).sin() * 10.0;
        let amp = 0.05 * ((t * 0.3).sin() * 0.5 + 0.5);
        let sample = (self.phase * std::f64::consts::TAU).sin() * amp;

        self.phase = (self.phase + freq / sample_rate).fract();
        sample as f32
    }

    #[must_use]
    pub fn phase(&self) -> f64 {
        self.phase
    }
}

// No effect lasts longer than this
const MAX_EFFECT_SECONDS: f64 = 2.0;

/// Stereo sample of `effect`, `t` seconds after it started.
#[must_use]
pub fn generate_sound_sample(effect: SoundEffect, t: f64) -> (f32, f32) {
    let t = t as f32;

    if t > MAX_EFFECT_SECONDS as f32 {
        return (0.0, 0.0);
    }

    let tone = |freq: f32| (t * freq * std::f32::consts::TAU).sin();

    match effect {
        SoundEffect::Move => {
            let amp = if t < 0.05 { 0.3 } else { 0.0 };
            let sample = tone(220.0) * amp;
            (sample, sample)
        }
        SoundEffect::Rotate => {
            let amp = if t < 0.05 { 0.3 } else { 0.0 };
            let sample = tone(440.0) * amp;
            (sample, sample)
        }
        SoundEffect::NewBrick => {
            let amp = if t < 0.08 { 0.2 } else { 0.0 };
            let sample = tone(330.0) * amp;
            (sample, sample)
        }
        SoundEffect::Land => {
            // Thud: short noise burst over a low tone
            let amp = (0.1 - t).max(0.0) * 5.0;
            let noise = fastrand::f32() * 0.1;
            let sample = (noise + tone(80.0) * 0.2) * amp;
            (sample * 0.8, sample * 1.2)
        }
        SoundEffect::LineClear => {
            let freq = 300.0 + 500.0 * (t * 5.0).min(1.0);
            let amp = if t < 0.2 {
                1.0
            } else {
                (0.5 - t).max(0.0) * 2.0
            };
            let sample = tone(freq) * amp * 0.3;
            (sample * 1.2, sample * 0.8)
        }
        SoundEffect::GameStart => {
            let (freq, amp) = if t < 0.2 {
                (330.0, 1.0)
            } else if t < 0.4 {
                (392.0, 1.0)
            } else if t < 0.6 {
                (494.0, 1.0)
            } else {
                (0.0, 0.0)
            };
            let sample = tone(freq) * amp * 0.4;
            (sample, sample)
        }
        SoundEffect::GameOver => {
            let freq = 600.0 - 400.0 * t;
            let amp = (2.0 - t).max(0.0) * 0.5;
            let sample = tone(freq) * amp * 0.4;
            (sample, sample)
        }
    }
}
