//! Static reference data: level descriptions, prompt instruction blocks, the
//! homonym database, and the emergency fallback table.
//!
//! Everything here is immutable process-wide. Each level-indexed table is a
//! total function over `Level`, so lookups can never fail; the `Standard`
//! variant carries its own entries rather than aliasing another level.

use crate::domain::Level;

/// Natural-language description of a proficiency level, embedded in prompts.
pub fn level_description(level: Level) -> &'static str {
  match level {
    Level::N5 => {
      "Beginner level (N5) - Absolute beginner: Able to understand basic Japanese phrases and \
       sentences when spoken slowly. Can read hiragana, katakana, and about 100 kanji. Vocabulary \
       knowledge includes approximately 800 words covering basic needs and everyday situations. \
       Can introduce oneself and engage in very simple conversations."
    }
    Level::N4 => {
      "Basic level (N4) - Basic daily expressions: Can understand conversations about everyday \
       topics when spoken slowly. Able to read and write about 300 kanji and comprehend simple \
       passages on familiar topics. Vocabulary knowledge extends to roughly 1,500 words. Can \
       handle basic social interactions and express simple opinions or preferences."
    }
    Level::N3 => {
      "Intermediate level (N3) - Everyday communication: Can understand coherent Japanese used in \
       daily situations at near-natural speed. Able to read approximately 650 kanji and comprehend \
       newspaper headlines and straightforward articles. Vocabulary knowledge covers about 3,700 \
       words. Can express opinions, describe experiences, and maintain conversations on familiar \
       topics with some fluency."
    }
    Level::N2 => {
      "Upper intermediate level (N2) - Practical communication: Can understand natural-speed \
       Japanese in a variety of situations. Able to read 1,000+ kanji and comprehend newspapers, \
       general articles, and some specialized content with occasional dictionary use. Vocabulary \
       knowledge extends to roughly 6,000 words. Can communicate effectively in most social and \
       professional contexts, expressing ideas with reasonable clarity and accuracy."
    }
    Level::N1 => {
      "Advanced level (N1) - Natural, native-like expressions: Can understand Japanese used in a \
       wide range of sophisticated contexts. Able to read 2,000+ kanji and comprehend complex \
       texts including abstract concepts, literary works, and specialized content. Vocabulary \
       knowledge exceeds 10,000 words. Can communicate with nuance and subtlety, demonstrating \
       near-native fluency across various situations and topics."
    }
    Level::Standard => {
      "Intermediate level (default) - Represents a balanced proficiency level approximately \
       equivalent to N3, suitable for everyday communication and basic professional interactions. \
       Includes knowledge of common vocabulary, grammar patterns, and cultural references \
       sufficient for most general purposes."
    }
  }
}

/// Detailed grammar instructions embedded in the example prompt.
pub fn detailed_instructions(level: Level) -> &'static str {
  match level {
    Level::N5 => {
      "Create very simple, short sentences using basic subject-object-verb structure. \
       Use only basic vocabulary (around 800 words) and masu-form present tense. \
       Include basic particles (は, を, に, で, etc.) and simple question forms. \
       Use simple time expressions (今日, 明日, etc.) and straightforward counters. \
       Avoid conjugations beyond the essentials (masu-form, simple negative). \
       Keep sentences under 8-10 words with minimal compound structures."
    }
    Level::N4 => {
      "Use basic daily expressions with simple past and present tense forms. \
       Include te-form for requests, permissions, and ongoing actions. \
       Incorporate basic conjunctions (そして, でも, から) and time connectors. \
       Introduce simple potential, imperative, and volitional forms. \
       Use ~たい for expressing desires and basic compound sentences. \
       Keep grammar straightforward and beginner-friendly with vocabulary of around 1,500 words. \
       Limit use of specialized terminology and complex modifier structures."
    }
    Level::N3 => {
      "Include both casual and polite forms with conditional structures (～たら, ～と, ～ば, ～なら). \
       Use transitive/intransitive verb pairs appropriately in context. \
       Incorporate provisional, causative, and passive expressions. \
       Employ more complex particles (について, によって) and conjunction patterns. \
       Use everyday vocabulary (around 3,700 words) with some specialized terms. \
       Include appropriate sentence-ending particles for natural conversation. \
       Demonstrate proper use of embedded clauses and complex modifiers."
    }
    Level::N2 => {
      "Employ more complex grammar including honorific and humble expressions. \
       Use keigo where appropriate (尊敬語, 謙譲語, 丁寧語) in social contexts. \
       Include advanced conditional forms and complex cause-effect relationships. \
       Incorporate idiomatic phrasing and expressions for practical contexts. \
       Use specialized vocabulary (around 6,000 words) relevant to professional settings. \
       Show proper use of complex modifiers, nominalizers, and sentence patterns. \
       Demonstrate appropriate register switching based on social context."
    }
    Level::N1 => {
      "Use advanced, native-like expressions including formal honorifics, \
       humble language, and situationally-appropriate speech styles. \
       Incorporate nuanced idioms, proverbs, and culturally-specific references. \
       Employ sophisticated rhetorical techniques and literary expressions. \
       Use specialized vocabulary (10,000+ words) with proper field-specific terminology. \
       Include complex grammatical structures rarely found in textbooks. \
       Provide cultural depth through appropriate speech patterns and sophisticated expressions. \
       Demonstrate native-like command of subtle connotations and implications."
    }
    Level::Standard => {
      "Use general intermediate grammar including plain and polite forms. \
       Incorporate common conditional structures and modal expressions. \
       Use moderate vocabulary (approximately 3,000-4,000 words) with some specialized terms. \
       Balance complexity and clarity in sentence structures. \
       Include commonly used idiomatic expressions and natural phrasing. \
       Demonstrate appropriate use of casual and formal speech based on context."
    }
  }
}

/// Usage-variation hints embedded in the example prompt.
pub fn usage_variations(level: Level) -> &'static str {
  match level {
    Level::N5 => {
      "Focus on clear, everyday usage only. \
       Use simple sentences in common situations like self-introductions, ordering food, \
       asking directions, and basic shopping interactions. \
       Limit contexts to classroom, home, and simple travel scenarios. \
       Avoid slang, colloquialisms, and regional variations. \
       Present information using only the most fundamental grammatical patterns."
    }
    Level::N4 => {
      "Show basic usage in common daily situations. \
       Include simple past experiences, future plans, and basic opinions. \
       Demonstrate usage in everyday contexts like shopping, dining, travel, and basic workplace \
       interactions. \
       Introduce simple expressions of preference, ability, and necessity. \
       Keep examples concrete and related to personal daily routines and needs. \
       Use straightforward question-answer patterns typical of beginner conversations."
    }
    Level::N3 => {
      "Mix casual and polite speech in everyday contexts. \
       Show appropriate switching between speech styles with friends versus acquaintances. \
       Include usage examples for social gatherings, workplace situations, and service encounters. \
       Demonstrate expressing opinions, making requests, giving reasons, and discussing plans. \
       Show proper use in both spoken and written contexts (emails, text messages, etc.). \
       Include examples of natural conversation flow with appropriate interjections and responses."
    }
    Level::N2 => {
      "Show usage in a variety of social settings and registers. \
       Demonstrate appropriate language for business meetings, customer service, and formal \
       occasions. \
       Include examples of persuasive, descriptive, and explanatory language. \
       Show proper keigo usage in hierarchical relationships and customer interactions. \
       Incorporate examples from mass media, academic contexts, and professional settings. \
       Demonstrate appropriately indirect expressions for requests, refusals, and criticism. \
       Include examples of situation-specific speech patterns and expressions."
    }
    Level::N1 => {
      "Demonstrate formal, informal, regional, and professional contexts where relevant. \
       Include examples of highly formal speech for ceremonial occasions and important business. \
       Show nuanced differences in expression based on age, gender, social status, and regional \
       background. \
       Incorporate examples from literature, news media, academic writing, and specialized fields. \
       Demonstrate subtle differences in nuance between similar expressions. \
       Show appropriate usage in sensitive situations requiring tact and cultural awareness. \
       Include examples of rhetorical techniques for persuasion, humor, and emotional impact. \
       Demonstrate understanding of historical language changes and contemporary trends."
    }
    Level::Standard => {
      "Use typical everyday polite and casual speech. \
       Balance formality appropriate to common social and professional situations. \
       Include examples from daily conversations, routine work interactions, and social media. \
       Show moderate level of politeness differentiation based on context. \
       Demonstrate natural conversational patterns with appropriate back-channeling. \
       Include examples relevant to both spoken and written communication."
    }
  }
}

/// Korean translation style guidelines embedded in the example prompt.
pub fn korean_translation_guidelines(level: Level) -> &'static str {
  match level {
    Level::N5 => {
      "가장 기본적인 구문과 단어를 사용하여 번역하세요. \
       자연스러운 한국어로 번역하되, 단순하고 직접적인 표현을 사용하세요. \
       일상 생활에서 자주 쓰이는 기본적인 표현으로 번역하세요. \
       한국어 문장을 짧고 명확하게 유지하세요."
    }
    Level::N4 => {
      "자연스러운 한국어로 번역하되, 일본어 문장 구조를 정확히 반영하세요. \
       일상적인 표현과 자연스러운 대화체로 번역하세요. \
       한국인이 실제로 사용하는 자연스러운 표현을 사용하세요. \
       일본어의 존댓말과 반말 구분을 적절히 번역하세요."
    }
    Level::N3 => {
      "자연스러운 한국어 표현으로 번역하되, 문맥에 맞게 의역하세요. \
       직역보다 의미 전달에 중점을 두어 번역하세요. \
       한국어 고유의 관용적 표현을 적절히 활용하세요. \
       대화 상황에 맞는 적절한 어조와 말투를 사용하세요."
    }
    Level::N2 => {
      "일본어 뉘앙스를 살리면서 자연스러운 한국어로 번역하세요. \
       한국어 관용구와 자연스러운 표현을 적극 활용하세요. \
       문맥과 상황에 맞게 적절한 어휘와 표현을 선택하세요. \
       사회적 맥락과 관계를 고려하여 적절한 존대 표현을 사용하세요."
    }
    Level::N1 => {
      "고급 한국어 표현과 관용적 어휘를 활용하여 자연스럽게 번역하세요. \
       원문의 뉘앙스와 문체를 최대한 살리면서 세련된 한국어로 표현하세요. \
       문화적 맥락을 고려하여 한국어 독자에게 자연스럽게 전달되도록 번역하세요. \
       상황과 인간관계에 적합한 존대 표현과 말투를 정확히 구사하세요."
    }
    Level::Standard => {
      "자연스러운 한국어 표현으로 의미를 정확히 전달하세요. \
       문맥에 맞게 적절한 어휘와 표현을 선택하세요. \
       한국어 화자가 실제로 사용하는 자연스러운 표현을 사용하세요. \
       상황에 맞는 적절한 존대 표현과 말투를 사용하세요."
    }
  }
}

/// One static homonym database entry.
#[derive(Clone, Copy, Debug)]
pub struct HomonymEntry {
  pub kanji: &'static str,
  pub pos: &'static str,
  pub meaning: &'static str,
  pub contexts: &'static [&'static str],
}

const fn h(
  kanji: &'static str,
  pos: &'static str,
  meaning: &'static str,
  contexts: &'static [&'static str],
) -> HomonymEntry {
  HomonymEntry { kanji, pos, meaning, contexts }
}

/// Homonym database keyed by reading, grouped by the level the reading is
/// introduced at. Index with `Level::rank()`.
pub static HOMONYM_DATABASE: &[(Level, &[(&str, &[HomonymEntry])])] = &[
  (
    Level::N5,
    &[
      ("あめ", &[
        h("雨", "名詞", "하늘에서 내리는 물", &["날씨", "비가 오다"]),
        h("飴", "名詞", "달콤한 과자", &["사탕", "간식"]),
      ]),
      ("はな", &[
        h("花", "名詞", "식물의 꽃", &["꽃다발", "벚꽃"]),
        h("鼻", "名詞", "얼굴 중앙의 기관", &["냄새 맡다", "코피"]),
      ]),
      ("はし", &[
        h("箸", "名詞", "식사용 도구", &["젓가락질", "식사"]),
        h("橋", "名詞", "강에 건설한 길", &["다리 건너기", "교통"]),
      ]),
      ("きる", &[
        h("切る", "動詞", "자르다", &["종이 자르기", "요리"]),
        h("着る", "動詞", "입다", &["옷 입기", "착용"]),
      ]),
      ("いる", &[
        h("居る", "動詞", "있다, 존재하다", &["사람이 있다", "머물다"]),
        h("要る", "動詞", "필요하다", &["도움이 필요하다", "요구"]),
      ]),
      ("おじさん", &[
        h("叔父さん", "名詞", "삼촌", &["가족 관계", "친척"]),
        h("小父さん", "名詞", "나이 든 남성", &["아저씨", "호칭"]),
      ]),
      ("おばさん", &[
        h("伯母さん", "名詞", "이모/고모", &["가족 관계", "친척"]),
        h("小母さん", "名詞", "나이 든 여성", &["아주머니", "호칭"]),
      ]),
      ("ゆき", &[
        h("雪", "名詞", "눈", &["겨울", "눈사람"]),
        h("行き", "名詞", "~행, 목적지", &["도쿄행", "방향"]),
      ]),
      ("くも", &[
        h("雲", "名詞", "하늘에 떠 있는 구름", &["날씨", "하늘"]),
        h("蜘蛛", "名詞", "거미", &["곤충", "거미줄"]),
      ]),
      ("あつい", &[
        h("暑い", "形容詞", "기온이 높다", &["여름", "더운 날씨"]),
        h("熱い", "形容詞", "온도가 높다", &["뜨거운 물", "열기"]),
      ]),
      ("め", &[
        h("目", "名詞", "시각 기관", &["보다", "눈동자"]),
        h("芽", "名詞", "식물의 새싹", &["새싹", "발아"]),
      ]),
      ("いま", &[
        h("今", "名詞", "현재", &["지금", "현재 시점"]),
        h("居間", "名詞", "거실", &["방", "생활공간"]),
      ]),
    ],
  ),
  (
    Level::N4,
    &[
      ("かみ", &[
        h("紙", "名詞", "문서에 사용하는 재료", &["종이", "인쇄"]),
        h("髪", "名詞", "머리카락", &["헤어스타일", "미용"]),
        h("神", "名詞", "신앙의 대상", &["종교", "신사"]),
      ]),
      ("しろ", &[
        h("白", "名詞", "흰색", &["색깔", "순수"]),
        h("城", "名詞", "성곽", &["역사", "건축물"]),
      ]),
      ("かう", &[
        h("買う", "動詞", "구입하다", &["쇼핑", "구매"]),
        h("飼う", "動詞", "동물을 기르다", &["애완동물", "사육"]),
      ]),
      ("あう", &[
        h("会う", "動詞", "만나다", &["약속", "만남"]),
        h("合う", "動詞", "맞다, 적합하다", &["어울리다", "조화"]),
      ]),
      ("とる", &[
        h("取る", "動詞", "손에 잡다", &["집다", "획득"]),
        h("撮る", "動詞", "사진을 찍다", &["촬영", "기록"]),
        h("捕る", "動詞", "잡다", &["사냥", "포획"]),
      ]),
      ("とぶ", &[
        h("飛ぶ", "動詞", "공중을 이동하다", &["비행", "날다"]),
        h("跳ぶ", "動詞", "뛰다", &["점프", "도약"]),
      ]),
      ("なく", &[
        h("鳴く", "動詞", "동물이 소리내다", &["새 울음소리", "동물"]),
        h("泣く", "動詞", "눈물을 흘리다", &["슬프다", "감정"]),
      ]),
      ("かわ", &[
        h("川", "名詞", "물의 흐름", &["강", "자연"]),
        h("皮", "名詞", "피부, 가죽", &["동물 가죽", "표면"]),
      ]),
      ("かた", &[
        h("方", "名詞", "사람을 높여 부르는 말", &["호칭", "존경"]),
        h("肩", "名詞", "팔의 뿌리", &["어깨", "신체"]),
      ]),
      ("あがる・あげる", &[
        h("上げる", "動詞", "올리다", &["상승", "높이다"]),
        h("揚げる", "動詞", "기름에 튀기다", &["요리", "튀김"]),
        h("挙げる", "動詞", "예를 들다", &["언급", "거론"]),
      ]),
    ],
  ),
  (
    Level::N3,
    &[
      ("かぶ", &[
        h("株", "名詞", "주식", &["투자", "금융"]),
        h("蕪", "名詞", "순무", &["야채", "농업"]),
      ]),
      ("きかく", &[
        h("企画", "名詞", "계획", &["프로젝트", "기획"]),
        h("規格", "名詞", "표준", &["기준", "규격"]),
      ]),
      ("しじ", &[
        h("指示", "名詞", "지시", &["명령", "안내"]),
        h("支持", "名詞", "지지", &["응원", "후원"]),
      ]),
      ("けいき", &[
        h("景気", "名詞", "경기", &["경제 상황", "호황"]),
        h("契機", "名詞", "계기", &["기회", "전환점"]),
      ]),
      ("しょうひん", &[
        h("商品", "名詞", "상품", &["판매품", "제품"]),
        h("賞品", "名詞", "상품", &["경품", "상금"]),
      ]),
      ("こうざ", &[
        h("講座", "名詞", "강좌", &["강의", "교육"]),
        h("口座", "名詞", "계좌", &["은행", "금융"]),
      ]),
      ("げんきん", &[
        h("現金", "名詞", "현금", &["돈", "지불"]),
        h("厳禁", "名詞", "엄금", &["금지", "규칙"]),
      ]),
    ],
  ),
  (
    Level::N2,
    &[
      ("せいり", &[
        h("整理", "名詞", "정리", &["정돈", "정리정돈"]),
        h("生理", "名詞", "생리", &["월경", "생리학"]),
      ]),
      ("いたみ", &[
        h("痛み", "名詞", "고통", &["아픔", "통증"]),
        h("傷み", "名詞", "손상", &["부패", "상함"]),
      ]),
      ("いし", &[
        h("医師", "名詞", "의사", &["의료진", "병원"]),
        h("石", "名詞", "돌", &["바위", "광물"]),
        h("意思", "名詞", "의지", &["생각", "의도"]),
      ]),
      ("どうき", &[
        h("動機", "名詞", "동기", &["이유", "목적"]),
        h("動悸", "名詞", "동계", &["심장박동", "의료"]),
      ]),
      ("けっかん", &[
        h("血管", "名詞", "혈관", &["의료", "순환기"]),
        h("欠陥", "名詞", "결함", &["문제", "부족"]),
      ]),
      ("ほけん", &[
        h("保健", "名詞", "보건", &["건강", "의료"]),
        h("保険", "名詞", "보험", &["계약", "보장"]),
      ]),
      ("はい", &[
        h("肺", "名詞", "폐", &["호흡기", "의료"]),
        h("灰", "名詞", "재", &["연소", "화산재"]),
      ]),
      ("のう", &[
        h("脳", "名詞", "뇌", &["머리", "의료"]),
        h("能", "名詞", "능력", &["기능", "재능"]),
      ]),
      ("せいけい", &[
        h("整形", "名詞", "성형", &["수술", "의료"]),
        h("成形", "名詞", "성형", &["모양 만들기", "제작"]),
      ]),
      ("いしょく", &[
        h("移植", "名詞", "이식", &["장기이식", "의료"]),
        h("異色", "名詞", "이색", &["특이함", "독특함"]),
      ]),
      ("よむ", &[
        h("読む", "動詞", "읽다", &["독서", "학습"]),
        h("詠む", "動詞", "읊다", &["시가", "문학"]),
      ]),
      ("みる", &[
        h("見る", "動詞", "보다", &["시각", "관찰"]),
        h("観る", "動詞", "관람하다", &["감상", "공연"]),
        h("診る", "動詞", "진찰하다", &["의료", "진료"]),
      ]),
      ("きく", &[
        h("聞く", "動詞", "듣다, 묻다", &["청각", "질문"]),
        h("聴く", "動詞", "주의 깊게 듣다", &["감상", "집중"]),
        h("効く", "動詞", "효과가 있다", &["약효", "작용"]),
      ]),
      ("つくる", &[
        h("作る", "動詞", "만들다", &["제작", "창작"]),
        h("造る", "動詞", "건조하다", &["건축", "건설"]),
        h("創る", "動詞", "창조하다", &["창작", "예술"]),
      ]),
      ("あらわす", &[
        h("表す", "動詞", "표현하다", &["감정", "의견"]),
        h("現す", "動詞", "나타내다", &["출현", "드러내다"]),
        h("著す", "動詞", "저술하다", &["집필", "출간"]),
      ]),
      ("さす", &[
        h("指す", "動詞", "가리키다", &["방향", "지시"]),
        h("差す", "動詞", "우산을 쓰다", &["우산", "햇빛"]),
        h("刺す", "動詞", "찌르다", &["날카로움", "공격"]),
        h("挿す", "動詞", "꽂다", &["삽입", "장식"]),
      ]),
      ("はなす", &[
        h("話す", "動詞", "말하다", &["대화", "소통"]),
        h("放す", "動詞", "놓아주다", &["해방", "방출"]),
        h("離す", "動詞", "떨어뜨리다", &["분리", "거리"]),
      ]),
      ("すすめる", &[
        h("進める", "動詞", "전진시키다", &["진행", "발전"]),
        h("勧める", "動詞", "권하다", &["추천", "제안"]),
        h("薦める", "動詞", "추천하다", &["천거", "소개"]),
      ]),
      ("おさめる", &[
        h("収める", "動詞", "얻다", &["수입", "획득"]),
        h("納める", "動詞", "납입하다", &["세금", "지불"]),
        h("治める", "動詞", "다스리다", &["통치", "관리"]),
        h("修める", "動詞", "습득하다", &["학습", "연마"]),
      ]),
    ],
  ),
  (
    Level::N1,
    &[
      ("しょうにん", &[
        h("証人", "名詞", "증인", &["법정", "증언"]),
        h("商人", "名詞", "상인", &["장사", "무역"]),
      ]),
      ("しこう", &[
        h("施行", "名詞", "시행", &["법률", "실시"]),
        h("試行", "名詞", "시행", &["테스트", "실험"]),
        h("志向", "名詞", "지향", &["목표", "방향성"]),
      ]),
      ("ほしょう", &[
        h("保証", "名詞", "보증", &["약속", "담보"]),
        h("保障", "名詞", "보장", &["보호", "안전"]),
        h("補償", "名詞", "보상", &["배상", "손해"]),
      ]),
      ("ふよう", &[
        h("不要", "形容動詞", "불필요", &["필요없음", "무용"]),
        h("扶養", "名詞", "부양", &["양육", "지원"]),
      ]),
      ("たいほ", &[
        h("逮捕", "名詞", "체포", &["경찰", "범죄"]),
        h("大砲", "名詞", "대포", &["무기", "군사"]),
      ]),
      ("こじん", &[
        h("個人", "名詞", "개인", &["개별", "사적"]),
        h("故人", "名詞", "고인", &["사망자", "추모"]),
      ]),
      ("けいじ", &[
        h("刑事", "名詞", "형사", &["경찰", "수사"]),
        h("掲示", "名詞", "게시", &["공지", "알림"]),
      ]),
      ("きそ", &[
        h("起訴", "名詞", "기소", &["법정", "소송"]),
        h("基礎", "名詞", "기초", &["토대", "바탕"]),
      ]),
      ("こくさい", &[
        h("国際", "名詞", "국제", &["국가간", "세계"]),
        h("国債", "名詞", "국채", &["국가 부채", "금융"]),
      ]),
      ("しょめい", &[
        h("署名", "名詞", "서명", &["사인", "계약"]),
        h("書名", "名詞", "서명", &["책 제목", "도서"]),
      ]),
    ],
  ),
];

/// Hardcoded emergency table consulted when both the database and the model
/// fail. Keyed by exact reading or kanji form.
pub fn emergency_homonyms(word: &str) -> Option<&'static [HomonymEntry]> {
  const KIKU: &[HomonymEntry] = &[
    h("聞く", "動詞", "듣다, 묻다", &["청각", "질문"]),
    h("聴く", "動詞", "주의 깊게 듣다", &["감상", "집중"]),
    h("効く", "動詞", "효과가 있다", &["약효", "작용"]),
  ];
  match word {
    "きく" | "聞く" => Some(KIKU),
    _ => None,
  }
}

/// Convert a Japanese part-of-speech tag to Korean for the public response.
/// Unknown tags pass through unchanged.
pub fn pos_to_korean(japanese_pos: &str) -> &str {
  match japanese_pos {
    "名詞" => "명사",
    "動詞" => "동사",
    "形容詞" => "형용사",
    "形容動詞" => "형용동사",
    "副詞" => "부사",
    "助詞" => "조사",
    "助動詞" => "조동사",
    "連体詞" => "관형사",
    "接続詞" => "접속사",
    "感動詞" => "감탄사",
    "代名詞" => "대명사",
    "数詞" => "수사",
    "接頭詞" => "접두사",
    "接尾詞" => "접미사",
    other => other,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tables_total_over_levels() {
    for level in [Level::N5, Level::N4, Level::N3, Level::N2, Level::N1, Level::Standard] {
      assert!(!level_description(level).is_empty());
      assert!(!detailed_instructions(level).is_empty());
      assert!(!usage_variations(level).is_empty());
      assert!(!korean_translation_guidelines(level).is_empty());
    }
  }

  #[test]
  fn database_levels_are_ordered() {
    let ranks: Vec<usize> = HOMONYM_DATABASE.iter().map(|(l, _)| l.rank()).collect();
    let mut sorted = ranks.clone();
    sorted.sort_unstable();
    assert_eq!(ranks, sorted);
  }

  #[test]
  fn emergency_table_excludes_nothing_by_itself() {
    let entries = emergency_homonyms("きく").unwrap();
    assert_eq!(entries.len(), 3);
    assert!(emergency_homonyms("あめ").is_none());
  }

  #[test]
  fn pos_conversion() {
    assert_eq!(pos_to_korean("動詞"), "동사");
    assert_eq!(pos_to_korean("未知"), "未知");
  }
}
