use anyhow::{anyhow, Context};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use log::error;

const TONE_HZ: f32 = 440.0;

/// A 440 Hz sine tone on the default output device, started and stopped on
/// the machine's sound edges.
pub struct Sound {
    stream: cpal::Stream,
    playing: bool,
}

impl Sound {
    pub fn new() -> anyhow::Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("no output device available"))?;
        let supported_config = device
            .default_output_config()
            .context("error while querying configs")?;
        let format = supported_config.sample_format();
        let config: cpal::StreamConfig = supported_config.into();

        let stream = match format {
            cpal::SampleFormat::I8 => Self::build::<i8>(&device, &config),
            cpal::SampleFormat::I16 => Self::build::<i16>(&device, &config),
            cpal::SampleFormat::I32 => Self::build::<i32>(&device, &config),
            cpal::SampleFormat::I64 => Self::build::<i64>(&device, &config),
            cpal::SampleFormat::U8 => Self::build::<u8>(&device, &config),
            cpal::SampleFormat::U16 => Self::build::<u16>(&device, &config),
            cpal::SampleFormat::U32 => Self::build::<u32>(&device, &config),
            cpal::SampleFormat::U64 => Self::build::<u64>(&device, &config),
            cpal::SampleFormat::F32 => Self::build::<f32>(&device, &config),
            cpal::SampleFormat::F64 => Self::build::<f64>(&device, &config),
            sample_format => Err(anyhow!("Unsupported sample format '{sample_format}'")),
        }?;
        // streams may start playing as soon as they are built
        stream.pause().context("unable to pause stream")?;

        Ok(Self {
            stream,
            playing: false,
        })
    }

    pub fn start(&mut self) {
        if self.playing {
            return;
        }
        match self.stream.play() {
            Ok(()) => self.playing = true,
            Err(err) => error!("unable to start tone: {err}"),
        }
    }

    pub fn stop(&mut self) {
        if !self.playing {
            return;
        }
        match self.stream.pause() {
            Ok(()) => self.playing = false,
            Err(err) => error!("unable to stop tone: {err}"),
        }
    }

    fn build<T>(device: &cpal::Device, config: &cpal::StreamConfig) -> anyhow::Result<cpal::Stream>
    where
        T: SizedSample + FromSample<f32>,
    {
        let sample_rate = config.sample_rate.0 as f32;
        let channels = config.channels as usize;

        // Produce a sinusoid of maximum amplitude.
        let mut sample_clock = 0f32;
        let mut next_value = move || {
            sample_clock = (sample_clock + 1.0) % sample_rate;
            (sample_clock * TONE_HZ * 2.0 * std::f32::consts::PI / sample_rate).sin()
        };

        let err_fn = |err| error!("an error occurred on stream: {}", err);

        device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    Self::write_data(data, channels, &mut next_value)
                },
                err_fn,
                None,
            )
            .context("unable to build output stream")
    }

    fn write_data<T>(output: &mut [T], channels: usize, next_sample: &mut dyn FnMut() -> f32)
    where
        T: Sample + FromSample<f32>,
    {
        for frame in output.chunks_mut(channels) {
            let value: T = T::from_sample(next_sample());
            for sample in frame.iter_mut() {
                *sample = value;
            }
        }
    }
}
