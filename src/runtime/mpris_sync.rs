use crate::api::AudioService;
use crate::app::App;
use crate::mpris::{MprisHandle, NowPlaying};

/// Describe the active item for media controls.
pub fn now_playing(app: &App, service: &dyn AudioService) -> Option<NowPlaying> {
    let key = app.playback.active.as_ref()?;
    let index = app.library.iter().position(|i| &i.key() == key)?;
    let item = &app.library[index];

    Some(NowPlaying {
        index,
        title: item.title.clone(),
        url: service.media_url(&item.url).ok().map(String::from),
        length: app.duration(key),
    })
}

pub fn update_mpris(mpris: &MprisHandle, app: &App, service: &dyn AudioService) {
    mpris.set_now_playing(now_playing(app, service).as_ref());
    mpris.set_playback(app.status());
}
