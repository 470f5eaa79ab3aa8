//! Built-in texts for quick analysis.

use clap::ValueEnum;

pub const VALID_SAMPLE: &str = "Menteri Keuangan Sri Mulyani Indrawati menyatakan bahwa realisasi sementara Anggaran Pendapatan dan Belanja Negara (APBN) 2024 mencatatkan kinerja positif hingga akhir Mei. Pendapatan negara mencapai Rp1.123,5 triliun atau 40,1 persen dari target, sementara belanja negara terealisasi sebesar Rp1.144,7 triliun atau 34,4 persen.";

pub const HOAX_SAMPLE: &str = "SEBARKAN!! Beredar kabar bahwa minuman bersoda dapat menyembuhkan penyakit COVID-19 dalam waktu singkat setelah dikonsumsi secara rutin. Informasi ini menyebar cepat di grup WhatsApp dan media sosial, mengklaim bahwa kandungan soda mampu membunuh virus di tenggorokan. Faktanya, klaim tersebut tidak memiliki dasar ilmiah dan telah dibantah oleh para ahli kesehatan.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Sample {
    Valid,
    Hoax,
}

impl Sample {
    pub fn text(&self) -> &'static str {
        match self {
            Sample::Valid => VALID_SAMPLE,
            Sample::Hoax => HOAX_SAMPLE,
        }
    }
}
