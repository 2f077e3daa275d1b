//! Single-page layout: the map on the left, panels and chat on the right.

use leptos::prelude::*;

use crate::components::chat_display::ChatDisplay;
use crate::components::chat_input::ChatInput;
use crate::components::header::Header;
use crate::components::pixel_info_card::PixelInfoCard;
use crate::components::pixel_map_host::PixelMapHost;
use crate::components::status_panel::StatusPanel;
use crate::components::upload_panel::UploadPanel;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <Header/>
            <main class="home-page__body">
                <div class="home-page__map">
                    <PixelMapHost/>
                </div>
                <aside class="home-page__side">
                    <StatusPanel/>
                    <PixelInfoCard/>
                    <UploadPanel/>
                    <div class="home-page__chat">
                        <ChatDisplay/>
                        <ChatInput/>
                    </div>
                </aside>
            </main>
        </div>
    }
}
