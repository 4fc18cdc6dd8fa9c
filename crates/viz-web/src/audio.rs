use js_sys::ArrayBuffer;
use std::cell::Cell;
use std::rc::Rc;
use viz_core::{average_frequency, FrequencySource, Playback};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

struct SoundGraph {
    ctx: web::AudioContext,
    gain: web::GainNode,
    analyser: web::AnalyserNode,
    bins: Vec<u8>,
}

/// Soundtrack output: one decoded buffer played through gain → analyser →
/// destination. Without WebAudio everything is a silent no-op.
pub struct WebSound {
    graph: Option<SoundGraph>,
    buffer: Option<web::AudioBuffer>,
    source: Option<web::AudioBufferSourceNode>,
    ended: Rc<Cell<bool>>,
    on_ended: Option<Closure<dyn FnMut()>>,
}

fn create_gain(ctx: &web::AudioContext, value: f32, label: &str) -> Result<web::GainNode, ()> {
    match web::GainNode::new(ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

fn build_graph(fft_size: u32) -> Result<SoundGraph, ()> {
    let ctx = web::AudioContext::new().map_err(|e| {
        log::error!("AudioContext error: {:?}", e);
    })?;
    let gain = create_gain(&ctx, 1.0, "Output")?;
    let analyser = web::AnalyserNode::new(&ctx).map_err(|e| {
        log::error!("AnalyserNode error: {:?}", e);
    })?;
    analyser.set_fft_size(fft_size);
    _ = gain.connect_with_audio_node(&analyser);
    _ = analyser.connect_with_audio_node(&ctx.destination());
    let bins = vec![0u8; analyser.frequency_bin_count() as usize];
    Ok(SoundGraph {
        ctx,
        gain,
        analyser,
        bins,
    })
}

impl WebSound {
    pub fn new(fft_size: u32) -> Self {
        let graph = build_graph(fft_size).ok();
        if graph.is_none() {
            log::warn!("[audio] WebAudio unavailable; running silent");
        }
        Self {
            graph,
            buffer: None,
            source: None,
            ended: Rc::new(Cell::new(false)),
            on_ended: None,
        }
    }

    pub fn context(&self) -> Option<web::AudioContext> {
        self.graph.as_ref().map(|g| g.ctx.clone())
    }

    pub fn set_buffer(&mut self, buffer: web::AudioBuffer) {
        self.buffer = Some(buffer);
    }

    #[allow(deprecated)]
    fn detach_source(&mut self) {
        if let Some(src) = self.source.take() {
            src.set_onended(None);
            let _ = src.stop();
            src.disconnect().ok();
        }
        self.on_ended = None;
    }
}

impl FrequencySource for WebSound {
    fn average_frequency(&mut self) -> f32 {
        match &mut self.graph {
            Some(g) => {
                g.analyser.get_byte_frequency_data(&mut g.bins);
                average_frequency(&g.bins)
            }
            None => 0.0,
        }
    }
}

impl Playback for WebSound {
    fn current_time(&self) -> f64 {
        self.graph.as_ref().map(|g| g.ctx.current_time()).unwrap_or(0.0)
    }

    #[allow(deprecated)]
    fn start(&mut self, offset_sec: f64) -> bool {
        let (Some(graph), Some(buffer)) = (&self.graph, &self.buffer) else {
            return false;
        };
        // Autoplay policy: the context may still be suspended before a gesture
        _ = graph.ctx.resume();
        let src = match graph.ctx.create_buffer_source() {
            Ok(s) => s,
            Err(e) => {
                log::error!("AudioBufferSourceNode error: {:?}", e);
                return false;
            }
        };
        src.set_buffer(Some(buffer));
        if let Err(e) = src.connect_with_audio_node(&graph.gain) {
            log::error!("connect error: {:?}", e);
            return false;
        }
        let ended = self.ended.clone();
        let on_ended = Closure::wrap(Box::new(move || ended.set(true)) as Box<dyn FnMut()>);
        src.set_onended(Some(on_ended.as_ref().unchecked_ref()));
        let started = src.start_with_when_and_grain_offset(graph.ctx.current_time(), offset_sec);
        if let Err(e) = started {
            log::error!("buffer start error: {:?}", e);
            return false;
        }
        self.detach_source();
        self.source = Some(src);
        self.on_ended = Some(on_ended);
        true
    }

    fn stop(&mut self) {
        self.detach_source();
    }

    fn take_ended(&mut self) -> bool {
        self.ended.replace(false)
    }
}

/// Fetch and decode the soundtrack.
pub async fn load_buffer(ctx: &web::AudioContext, url: &str) -> anyhow::Result<web::AudioBuffer> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {url}: {:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("fetch {url}: not a Response: {:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("fetch {url}: HTTP {}", resp.status());
    }
    let body = resp
        .array_buffer()
        .map_err(|e| anyhow::anyhow!("read {url}: {:?}", e))?;
    let bytes: ArrayBuffer = JsFuture::from(body)
        .await
        .map_err(|e| anyhow::anyhow!("read {url}: {:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("read {url}: {:?}", e))?;
    let decode = ctx
        .decode_audio_data(&bytes)
        .map_err(|e| anyhow::anyhow!("decode {url}: {:?}", e))?;
    let buffer: web::AudioBuffer = JsFuture::from(decode)
        .await
        .map_err(|e| anyhow::anyhow!("decode {url}: {:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("decode {url}: {:?}", e))?;
    Ok(buffer)
}
