use crate::constants::{CHIME_BASE_HZ, CHIME_GAIN, CHIME_MAX_STEPS, CHIME_SEC, CHIME_STEP_RATIO};
use stillpoint_core::constants::{AMBIENCE_CHANNELS, AMBIENCE_VOLUME_RAMP_SEC};
use stillpoint_core::{
    synthesize, FilterKind, Playback, SoundCategory, StopOutcome, ToneController, ToneEnvelope,
    MeditationSettings, ToneRequest, Waveform,
};
use web_sys as web;

/// Create a GainNode with an initial value.
pub fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(audio_ctx)
        .map_err(|e| anyhow::anyhow!("[audio] {} GainNode error: {:?}", label, e))?;
    g.gain().set_value(value);
    Ok(g)
}

/// Build the context on the first user gesture. Failure is reported once and
/// audio stays off for the session.
pub fn create_context() -> Option<web::AudioContext> {
    match web::AudioContext::new() {
        Ok(ctx) => {
            _ = ctx.resume();
            log::info!("[audio] context ready at {} Hz", ctx.sample_rate());
            Some(ctx)
        }
        Err(e) => {
            log::warn!("[audio] AudioContext unavailable, audio disabled: {:?}", e);
            None
        }
    }
}

fn oscillator_type(w: Waveform) -> web::OscillatorType {
    match w {
        Waveform::Sine => web::OscillatorType::Sine,
        Waveform::Square => web::OscillatorType::Square,
        Waveform::Saw => web::OscillatorType::Sawtooth,
        Waveform::Triangle => web::OscillatorType::Triangle,
    }
}

/// Ramp a gain param from its present value down to silence by `until`.
fn ramp_out(param: &web::AudioParam, now: f64, until: f64) {
    let current = param.value();
    _ = param.cancel_scheduled_values(now);
    _ = param.set_value_at_time(current, now);
    _ = param.linear_ramp_to_value_at_time(0.0, until);
}

struct Voice {
    osc: web::OscillatorNode,
    gain: web::GainNode,
}

impl Voice {
    fn release(&self, now: f64, until: f64) {
        ramp_out(&self.gain.gain(), now, until);
        _ = self.osc.stop_with_when(until);
    }

    fn disconnect(&self) {
        _ = self.osc.disconnect();
        _ = self.gain.disconnect();
    }
}

/// Continuous solfeggio/chakra tone: one oscillator and gain per `play`.
pub struct ToneGenerator {
    ctx: web::AudioContext,
    controller: ToneController,
    voice: Option<Voice>,
    releasing: Vec<(Voice, f64)>,
}

impl ToneGenerator {
    pub fn new(ctx: web::AudioContext, envelope: ToneEnvelope) -> Self {
        Self {
            ctx,
            controller: ToneController::new(envelope),
            voice: None,
            releasing: Vec::new(),
        }
    }

    pub fn set_fade_out(&mut self, sec: f64) {
        self.controller.set_fade_out(sec);
    }

    /// Fails on a rejected frequency or when the browser refuses the nodes;
    /// either way nothing is left sounding.
    pub fn play(&mut self, hz: f32, waveform: Option<Waveform>) -> anyhow::Result<()> {
        let now = self.ctx.current_time();
        let plan = self.controller.play(hz, waveform, now)?;
        if let (Some(until), Some(old)) = (plan.teardown_until, self.voice.take()) {
            old.release(now, until);
            self.releasing.push((old, until));
        }
        match self.build_voice(plan.request) {
            Ok(v) => {
                _ = v.gain.gain().set_value_at_time(0.0, plan.start_at);
                _ = v
                    .gain
                    .gain()
                    .linear_ramp_to_value_at_time(plan.peak_gain, plan.peak_at);
                _ = v.osc.start_with_when(plan.start_at);
                self.voice = Some(v);
                log::info!("[audio] tone {:.1} Hz ({:?})", plan.request.hz, plan.request.waveform);
            }
            Err(e) => {
                self.controller.abandon(now);
                return Err(e);
            }
        }
        Ok(())
    }

    fn build_voice(&self, req: ToneRequest) -> anyhow::Result<Voice> {
        let osc = web::OscillatorNode::new(&self.ctx)
            .map_err(|e| anyhow::anyhow!("[audio] OscillatorNode error: {:?}", e))?;
        osc.set_type(oscillator_type(req.waveform));
        osc.frequency().set_value(req.hz);
        let gain = create_gain(&self.ctx, 0.0, "tone")?;
        osc.connect_with_audio_node(&gain)
            .map_err(|e| anyhow::anyhow!("[audio] connect tone: {:?}", e))?;
        gain.connect_with_audio_node(&self.ctx.destination())
            .map_err(|e| anyhow::anyhow!("[audio] connect tone: {:?}", e))?;
        Ok(Voice { osc, gain })
    }

    pub fn stop(&mut self) {
        let now = self.ctx.current_time();
        match self.controller.stop(now) {
            StopOutcome::Release { release_until } => {
                if let Some(v) = self.voice.take() {
                    v.release(now, release_until);
                    self.releasing.push((v, release_until));
                }
                log::info!("[audio] tone fading out until {:.2}", release_until);
            }
            StopOutcome::AlreadyStopped => log::debug!("[audio] tone already stopped"),
        }
    }

    /// Disconnect voices whose release has finished.
    pub fn poll(&mut self) {
        let now = self.ctx.current_time();
        self.controller.poll(now);
        self.releasing.retain(|(v, until)| {
            if now >= *until {
                v.disconnect();
                false
            } else {
                true
            }
        });
    }
}

/// One-shot cue tone (breath phase change, pickup chime).
pub fn play_cue(ctx: &web::AudioContext, hz: f32, gain: f32, dur_sec: f64) {
    let osc = match web::OscillatorNode::new(ctx) {
        Ok(o) => o,
        Err(e) => {
            log::warn!("[audio] cue OscillatorNode error: {:?}", e);
            return;
        }
    };
    let env = match create_gain(ctx, 0.0, "cue") {
        Ok(g) => g,
        Err(e) => {
            log::warn!("{e:#}");
            return;
        }
    };
    osc.set_type(web::OscillatorType::Sine);
    osc.frequency().set_value(hz);
    let t0 = ctx.current_time() + 0.01;
    _ = env.gain().linear_ramp_to_value_at_time(gain, t0 + 0.02);
    _ = env.gain().linear_ramp_to_value_at_time(0.0, t0 + dur_sec);
    _ = osc.connect_with_audio_node(&env);
    _ = env.connect_with_audio_node(&ctx.destination());
    _ = osc.start_with_when(t0);
    _ = osc.stop_with_when(t0 + dur_sec + 0.02);
}

/// Chime pitch rises a semitone per combo step, capped at an octave.
pub fn pickup_chime(ctx: &web::AudioContext, combo: u32) {
    let steps = combo.saturating_sub(1).min(CHIME_MAX_STEPS);
    let hz = CHIME_BASE_HZ * CHIME_STEP_RATIO.powi(steps as i32);
    play_cue(ctx, hz, CHIME_GAIN, CHIME_SEC);
}

struct AmbienceLoop {
    source: web::AudioBufferSourceNode,
    filter: web::BiquadFilterNode,
    lfo: Option<(web::OscillatorNode, web::GainNode)>,
}

impl AmbienceLoop {
    fn teardown(&self) {
        _ = self.source.stop();
        _ = self.source.disconnect();
        _ = self.filter.disconnect();
        if let Some((osc, depth)) = &self.lfo {
            _ = osc.stop();
            _ = osc.disconnect();
            _ = depth.disconnect();
        }
    }
}

/// Looping procedural soundscape: buffer source -> biquad -> volume -> out.
pub struct AmbiencePlayer {
    ctx: web::AudioContext,
    volume: web::GainNode,
    playback: Playback,
    current: Option<AmbienceLoop>,
    seed: u64,
}

impl AmbiencePlayer {
    pub fn new(ctx: web::AudioContext, volume: f32) -> anyhow::Result<Self> {
        let gain = create_gain(&ctx, volume.clamp(0.0, 1.0), "ambience volume")?;
        gain.connect_with_audio_node(&ctx.destination())
            .map_err(|e| anyhow::anyhow!("[audio] connect ambience: {:?}", e))?;
        Ok(Self {
            ctx,
            volume: gain,
            playback: Playback::default(),
            current: None,
            seed: rand::random(),
        })
    }

    /// Stop whatever is looping and start `category` from a fresh buffer.
    pub fn play(&mut self, category: SoundCategory) -> anyhow::Result<()> {
        self.stop();
        self.seed = self.seed.wrapping_add(1);
        let noise = synthesize(category, self.ctx.sample_rate(), self.seed);
        let buffer = self
            .ctx
            .create_buffer(AMBIENCE_CHANNELS as u32, noise.len() as u32, noise.sample_rate)
            .map_err(|e| anyhow::anyhow!("[audio] create_buffer: {:?}", e))?;
        for (ch, mut samples) in noise.channels.into_iter().enumerate() {
            _ = buffer.copy_to_channel(&mut samples, ch as i32);
        }

        let source = web::AudioBufferSourceNode::new(&self.ctx)
            .map_err(|e| anyhow::anyhow!("[audio] AudioBufferSourceNode error: {:?}", e))?;
        source.set_buffer(Some(&buffer));
        source.set_loop(true);

        let spec = category.filter();
        let filter = web::BiquadFilterNode::new(&self.ctx)
            .map_err(|e| anyhow::anyhow!("[audio] BiquadFilterNode error: {:?}", e))?;
        filter.set_type(match spec.kind {
            FilterKind::Lowpass => web::BiquadFilterType::Lowpass,
            FilterKind::Bandpass => web::BiquadFilterType::Bandpass,
        });
        filter.frequency().set_value(spec.frequency_hz);
        filter.q().set_value(spec.q);

        let lfo = match category.lfo() {
            Some(l) => {
                let osc = web::OscillatorNode::new(&self.ctx)
                    .map_err(|e| anyhow::anyhow!("[audio] LFO error: {:?}", e))?;
                osc.frequency().set_value(l.rate_hz);
                let depth = create_gain(&self.ctx, l.depth_hz, "lfo depth")?;
                _ = osc.connect_with_audio_node(&depth);
                _ = depth.connect_with_audio_param(&filter.frequency());
                _ = osc.start();
                Some((osc, depth))
            }
            None => None,
        };

        _ = source.connect_with_audio_node(&filter);
        _ = filter.connect_with_audio_node(&self.volume);
        source
            .start()
            .map_err(|e| anyhow::anyhow!("[audio] ambience start: {:?}", e))?;

        self.playback.start(self.ctx.current_time());
        self.current = Some(AmbienceLoop {
            source,
            filter,
            lfo,
        });
        log::info!("[audio] ambience {}", category.label());
        Ok(())
    }

    pub fn stop(&mut self) {
        let now = self.ctx.current_time();
        if let StopOutcome::Release { .. } = self.playback.stop(now, 0.0) {
            if let Some(l) = self.current.take() {
                l.teardown();
            }
            self.playback.poll(now);
        }
    }

    pub fn set_volume(&self, v: f32) {
        let now = self.ctx.current_time();
        let param = self.volume.gain();
        let current = param.value();
        _ = param.cancel_scheduled_values(now);
        _ = param.set_value_at_time(current, now);
        _ = param.linear_ramp_to_value_at_time(v.clamp(0.0, 1.0), now + AMBIENCE_VOLUME_RAMP_SEC);
    }
}

/// Audio for one session: lazily built on first gesture, `None` if the
/// browser refused a context.
pub struct AudioRig {
    pub ctx: web::AudioContext,
    pub tone: ToneGenerator,
    pub ambience: AmbiencePlayer,
}

impl AudioRig {
    pub fn build(settings: &MeditationSettings) -> Option<Self> {
        let ctx = create_context()?;
        let ambience = match AmbiencePlayer::new(ctx.clone(), settings.volume) {
            Ok(a) => a,
            Err(e) => {
                log::warn!("{e:#}");
                return None;
            }
        };
        Some(Self {
            tone: ToneGenerator::new(
                ctx.clone(),
                ToneEnvelope::default().with_fade_out(settings.tone_fade_out_sec),
            ),
            ambience,
            ctx,
        })
    }

    pub fn close(&mut self) {
        self.tone.stop();
        self.ambience.stop();
        _ = self.ctx.close();
    }
}
