//! Transmit futures that yield to the executor while the UART is busy.

use core::future::poll_fn;
use core::task::Poll;

use crate::newline;
use crate::registers::Registers;
use crate::uart::Uart;

impl<R: Registers> Uart<R> {
    /// Transmits one byte, returning `Pending` for every busy Status read.
    ///
    /// There is no transmit interrupt to wait on, so the task wakes itself and
    /// is polled again on the executor's next pass.
    pub async fn write_byte_async(&mut self, byte: u8) {
        poll_fn(|cx| {
            if self.regs.tx_ready() {
                Poll::Ready(())
            } else {
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        })
        .await;
        self.regs.write_tx(byte);
    }

    /// Transmits text with `\r\n` line endings, yielding while busy.
    pub async fn write_string_async(&mut self, s: &[u8]) {
        for byte in newline::translate(s) {
            self.write_byte_async(byte).await;
        }
    }
}
