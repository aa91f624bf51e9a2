//! Durable home of the state image.
//!
//! Uses the nRF52840's internal flash via the `sequential-storage` map so
//! the 20-byte image survives power loss.  The engine never talks to flash
//! directly: it writes into a [`RamStore`] mirror, and the main loop
//! forwards each changed image to [`persist_task`] over [`SAVE_CHANNEL`].
//!
//! Storage layout:
//!   - One map entry, key [`KEY_STATE_IMAGE`], value = the raw image.
//!   - Flash pages are managed by `sequential-storage`, which handles
//!     wear levelling and garbage collection.

use defmt::{debug, error, info, warn};
use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_nrf::nvmc::Nvmc;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embedded_storage_async::nor_flash::NorFlash;
use slotbox::config::{STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};
use slotbox::storage::{RamStore, IMAGE_LEN};
use slotbox::Error;

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

/// Start address of our storage region.
const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;

/// End address (exclusive) of our storage region.
const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

/// Key for the state image in the map storage.
const KEY_STATE_IMAGE: u8 = 0x01;

/// Scratch buffer for sequential-storage (item header + image, word aligned).
const WORK_BUF_SIZE: usize = 64;

/// Changed images waiting to be written.  The UI only ever `try_send`s,
/// so a stalled or missing persist task cannot block the tick loop.
pub static SAVE_CHANNEL: Channel<CriticalSectionRawMutex, [u8; IMAGE_LEN], 2> = Channel::new();

/// Internal flash behind the async `NorFlash` interface.
pub type Flash = BlockingAsync<Nvmc<'static>>;

/// Read the last saved image into a fresh mirror.
///
/// Missing data yields an erased mirror, which the engine treats as
/// corrupt and replaces with the defaults.
pub async fn load_mirror(flash: &mut impl NorFlash) -> Result<RamStore, Error> {
    let mut buf = [0u8; WORK_BUF_SIZE];

    match sequential_storage::map::fetch_item::<u8, &[u8], _>(
        flash,
        STORAGE_START..STORAGE_END,
        &mut sequential_storage::cache::NoCache::new(),
        &mut buf,
        &KEY_STATE_IMAGE,
    )
    .await
    {
        Ok(Some(data)) => match <[u8; IMAGE_LEN]>::try_from(data) {
            Ok(image) => {
                info!("Loaded state image from flash");
                Ok(RamStore::from_image(image))
            }
            Err(_) => {
                warn!("State image has wrong length {}", data.len());
                Ok(RamStore::erased())
            }
        },
        Ok(None) => {
            info!("No state image in flash");
            Ok(RamStore::erased())
        }
        Err(e) => {
            error!("Flash read error: {:?}", defmt::Debug2Format(&e));
            Err(Error::Storage)
        }
    }
}

/// Write one image, replacing the previous entry.
pub async fn save_image(flash: &mut impl NorFlash, image: &[u8; IMAGE_LEN]) -> Result<(), Error> {
    let mut buf = [0u8; WORK_BUF_SIZE];
    let item: &[u8] = image;

    sequential_storage::map::store_item::<u8, &[u8], _>(
        flash,
        STORAGE_START..STORAGE_END,
        &mut sequential_storage::cache::NoCache::new(),
        &mut buf,
        &KEY_STATE_IMAGE,
        &item,
    )
    .await
    .map_err(|e| {
        error!("Flash write error: {:?}", defmt::Debug2Format(&e));
        Error::Storage
    })
}

/// Drain [`SAVE_CHANNEL`] into flash forever.
#[embassy_executor::task]
pub async fn persist_task(mut flash: Flash) -> ! {
    info!("Persist task started");

    loop {
        let mut image = SAVE_CHANNEL.receive().await;
        // Only the newest image matters.
        while let Ok(newer) = SAVE_CHANNEL.try_receive() {
            image = newer;
        }
        match save_image(&mut flash, &image).await {
            Ok(()) => debug!("State image written"),
            // The next changed image rewrites the whole entry.
            Err(e) => warn!("Image not persisted: {:?}", e),
        }
    }
}
