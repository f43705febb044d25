//! Indonesian messages.

pub(super) const MESSAGES: &[(&str, &str)] = &[
    ("cart", "Keranjang"),
    ("checkout", "Pembayaran"),
    ("collections", "Koleksi"),
    ("no-collections-found", "Tidak ada koleksi yang ditemukan"),
    ("go-home", "Kembali ke Beranda"),
    ("continue-shopping", "Lanjutkan Belanja"),
    ("sign-in", "Masuk"),
    ("register", "Daftar"),
    ("logout", "Keluar"),
    ("invalid-credentials", "Kredensial tidak valid. Silakan coba lagi."),
    ("registration-failed", "Pendaftaran gagal. Silakan coba lagi."),
    ("invalid-email-address", "Alamat email tidak valid"),
    (
        "password-must-be-at-least-n-characters",
        "Kata sandi harus terdiri dari setidaknya { $n } karakter",
    ),
    ("address", "Alamat"),
    ("delivery", "Pengiriman"),
    ("payment", "Pembayaran"),
    ("review", "Tinjauan"),
    ("shipping-address", "Alamat Pengiriman"),
    ("billing-address", "Alamat Penagihan"),
    ("use-same-address-for-billing", "Gunakan alamat yang sama untuk penagihan"),
    ("continue-to-delivery", "Lanjutkan ke Pengiriman"),
    ("continue-to-payment", "Lanjutkan ke Pembayaran"),
    ("review-order", "Tinjau Pesanan"),
    ("pay-using-provider", "Bayar menggunakan { $provider }"),
    ("place-order", "Lakukan Pemesanan"),
    ("continue", "Lanjutkan"),
    ("select-shipping-method", "Pilih Metode Pengiriman"),
    ("select-payment-method", "Pilih Metode Pembayaran"),
    ("shipping-method", "Metode Pengiriman"),
    ("payment-method", "Metode Pembayaran"),
    (
        "no-additional-actions-required-for-manual-payment",
        "Tidak ada tindakan tambahan yang diperlukan untuk pembayaran manual.",
    ),
    (
        "payment-provider-is-in-development",
        "Penyedia pembayaran { $provider } sedang dalam pengembangan.",
    ),
    ("stripe-payment-coming-soon", "Antarmuka pembayaran Stripe segera hadir!"),
    ("error", "Kesalahan"),
    ("an-error-occurred", "Terjadi kesalahan"),
    ("please-select-a-payment-method", "Silakan pilih penyedia pembayaran"),
    ("no-cart-found", "Keranjang tidak ditemukan"),
    ("cart-is-empty", "Keranjang Anda kosong"),
    ("no-cart-id", "ID Keranjang tidak ada"),
    ("no-region-id", "ID wilayah tidak ada"),
    ("no-shipping-method-selected", "Tidak ada metode pengiriman yang dipilih"),
    ("no-payment-method-selected", "Tidak ada metode pembayaran yang dipilih"),
    ("payment-provider-not-supported", "Penyedia pembayaran tidak didukung"),
    ("failed-to-complete-order", "Gagal menyelesaikan pesanan"),
    ("failed-to-update-shipping-method", "Gagal memperbarui metode pengiriman"),
    ("operation-in-progress", "Harap tunggu hingga tindakan saat ini selesai"),
    ("first-name-is-required", "Nama depan wajib diisi"),
    ("last-name-is-required", "Nama belakang wajib diisi"),
    ("address-is-required", "Alamat wajib diisi"),
    ("postal-code-is-required", "Kode pos wajib diisi"),
    ("city-is-required", "Kota wajib diisi"),
    ("country-is-required", "Negara wajib diisi"),
    ("phone-is-required", "Nomor telepon wajib diisi"),
    ("please-enter-a-valid-email", "Silakan masukkan email yang valid"),
    ("order-with-id", "Pesanan # { $id }"),
    ("order-details", "Detail Pesanan"),
    ("order-not-found", "Pesanan tidak ditemukan"),
    ("placed-on", "Dipesan pada { $datetime }"),
    ("status", "Status"),
    ("order-items", "Item Pesanan"),
    ("order-summary", "Ringkasan Pesanan"),
    ("count-items", "{ $count } item"),
    ("canceled", "Dibatalkan"),
    ("not-fulfilled", "Belum Dipenuhi"),
    ("partially-fulfilled", "Sebagian Dipenuhi"),
    ("fulfilled", "Dipenuhi"),
    ("partially-shipped", "Sebagian Dikirim"),
    ("shipped", "Dikirim"),
    ("partially-delivered", "Sebagian Diterima"),
    ("delivered", "Diterima"),
    ("subtotal", "Subtotal"),
    ("discount", "Diskon"),
    ("shipping", "Pengiriman"),
    ("taxes", "Pajak"),
    ("total", "Total"),
    ("qty", "Jml"),
    ("product-information", "Informasi Produk"),
    ("material", "Bahan"),
    ("country-of-origin", "Negara Asal"),
    ("weight", "Berat"),
    ("dimensions", "Dimensi"),
    ("variant", "Varian"),
    ("add-to-cart", "Tambahkan ke keranjang"),
    ("out-of-stock", "Stok habis"),
];
