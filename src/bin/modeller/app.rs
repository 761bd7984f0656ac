//! Octaver host - cpal input -> OctaverNode -> cpal output, plus the TUI

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;
use tracing::{error, info, warn};

use modeller_dsp::{
    control::OctaverMessage,
    graph::{GraphNode, OctaverNode, RenderCtx},
    OctaverConfig, MAX_BLOCK_SIZE,
};

use super::ui::{OctaverUi, UiStateInit, UiStateUpdate, VIS_BUFFER_SIZE};

/// Capacity in samples of the input -> output ring (~0.7s at 48kHz)
const INPUT_RING_LEN: usize = 32_768;
/// Capacity in blocks of the output -> UI ring
const AUDIO_RING_BLOCKS: usize = 16;

pub fn run_octaver(mut config: OctaverConfig) -> EyreResult<()> {
    let host = cpal::default_host();
    let output = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let input = host
        .default_input_device()
        .ok_or_else(|| eyre!("no default input device available"))?;

    let output_config = output
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;
    let input_config = input
        .default_input_config()
        .wrap_err("failed to fetch default input config")?;

    let sample_rate = output_config.sample_rate().0 as f32;
    let out_channels = output_config.channels() as usize;
    let in_channels = input_config.channels() as usize;
    if input_config.sample_rate() != output_config.sample_rate() {
        warn!(
            input = input_config.sample_rate().0,
            output = output_config.sample_rate().0,
            "input and output sample rates differ; pitch will be off"
        );
    }

    config.sample_rate = sample_rate;
    let node = OctaverNode::new(&config).wrap_err("invalid octaver configuration")?;
    let init = UiStateInit {
        sample_rate,
        buffer_len: node.shifter().buffer_len(),
        input_name: input.name().unwrap_or_else(|_| "input".to_string()),
        output_name: output.name().unwrap_or_else(|_| "output".to_string()),
    };
    let initial = UiStateUpdate {
        window: node.shifter().params().comparison_window_length(),
        threshold: node.shifter().params().skip_threshold(),
        ..UiStateUpdate::default()
    };

    info!(
        sample_rate,
        buffer_len = init.buffer_len,
        input = %init.input_name,
        output = %init.output_name,
        "starting octaver"
    );

    // --- Cross-thread rings ---
    let (mut in_tx, mut in_rx) = RingBuffer::<f32>::new(INPUT_RING_LEN);
    let (control_tx, control_rx) = RingBuffer::<OctaverMessage>::new(64);
    let (mut audio_tx, audio_rx) = RingBuffer::<f32>::new(VIS_BUFFER_SIZE * AUDIO_RING_BLOCKS);
    let (mut state_tx, state_rx) = RingBuffer::<UiStateUpdate>::new(32);

    // Input callback: downmix to mono and hand over. Overflow drops samples.
    let input_stream = input.build_input_stream(
        &input_config.into(),
        move |data: &[f32], _| {
            for frame in data.chunks(in_channels) {
                let mono = frame.iter().sum::<f32>() / in_channels as f32;
                let _ = in_tx.push(mono);
            }
        },
        |err| error!("input stream error: {err}"),
        None,
    )?;

    let mut node = node.with_receiver(control_rx);
    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];
    let mut ctx = RenderCtx::new(sample_rate);
    let mut underruns = 0u64;

    // Output callback: pull input, shift, duplicate mono to all channels
    let output_stream = output.build_output_stream(
        &output_config.into(),
        move |data: &mut [f32], _| {
            let total_frames = data.len() / out_channels;
            let mut frames_written = 0;

            while frames_written < total_frames {
                let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                let block = &mut render_buf[..frames_to_render];

                for sample in block.iter_mut() {
                    *sample = match in_rx.pop() {
                        Ok(s) => s,
                        Err(_) => {
                            underruns += 1;
                            0.0
                        }
                    };
                }

                node.render_block(block, &ctx);
                ctx.advance(frames_to_render);

                let out_off = frames_written * out_channels;
                for (i, &s) in block.iter().enumerate() {
                    for ch in 0..out_channels {
                        data[out_off + i * out_channels + ch] = s;
                    }
                    let _ = audio_tx.push(s);
                }

                frames_written += frames_to_render;
            }

            let shifter = node.shifter();
            let _ = state_tx.push(UiStateUpdate {
                skip_count: shifter.skip_count(),
                samples_processed: shifter.samples_processed(),
                window: shifter.params().comparison_window_length(),
                threshold: shifter.params().skip_threshold(),
                underruns,
                stream_time: ctx.time,
            });
        },
        |err| error!("output stream error: {err}"),
        None,
    )?;

    input_stream.play().wrap_err("failed to start input stream")?;
    output_stream.play().wrap_err("failed to start output stream")?;

    let mut terminal = ratatui::init();
    let result = OctaverUi::new(audio_rx, state_rx, control_tx, init, initial).run(&mut terminal);
    ratatui::restore();

    info!("octaver stopped");
    result
}
